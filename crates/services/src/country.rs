use std::sync::Arc;

use culture_core::SUPPORTED_COUNTRIES;
use culture_core::catalog::is_supported_country;
use culture_core::model::{CountryName, UserId};
use storage::repository::ProgressStore;

use crate::error::CountryError;

/// Chooses the country whose module progress the home screen records.
#[derive(Clone)]
pub struct CountryService {
    progress: Arc<dyn ProgressStore>,
}

impl CountryService {
    #[must_use]
    pub fn new(progress: Arc<dyn ProgressStore>) -> Self {
        Self { progress }
    }

    #[must_use]
    pub fn supported(&self) -> &'static [&'static str] {
        SUPPORTED_COUNTRIES
    }

    /// Stores `country` as the user's selection, keeping their other progress.
    ///
    /// # Errors
    ///
    /// Returns `CountryError::Unsupported` without writing anything if there is
    /// no content for `country`, or `CountryError::Storage` if the write fails.
    pub async fn select(&self, user: &UserId, country: &str) -> Result<CountryName, CountryError> {
        if !is_supported_country(country) {
            return Err(CountryError::Unsupported(country.trim().to_owned()));
        }
        let country = CountryName::new(country)?;
        self.progress.set_selected_country(user, &country).await?;
        log::info!("{user} selected {country}");
        Ok(country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::InMemoryProgressStore;
    use storage::repository::StorageError;

    #[tokio::test]
    async fn unsupported_country_writes_nothing() {
        let store = InMemoryProgressStore::new();
        let service = CountryService::new(Arc::new(store.clone()));
        let user = UserId::new("user-1").unwrap();

        let err = service.select(&user, "Japan").await.unwrap_err();
        assert!(matches!(err, CountryError::Unsupported(name) if name == "Japan"));
        assert_eq!(store.read_user(&user).await, Err(StorageError::NotFound));
    }

    #[tokio::test]
    async fn selection_is_trimmed_and_stored() {
        let store = InMemoryProgressStore::new();
        let service = CountryService::new(Arc::new(store.clone()));
        let user = UserId::new("user-1").unwrap();

        let selected = service.select(&user, "  United Arab Emirates ").await.unwrap();
        assert_eq!(selected.as_str(), "United Arab Emirates");
        let record = store.read_user(&user).await.unwrap();
        assert_eq!(record.selected_country, Some(selected));
    }
}
