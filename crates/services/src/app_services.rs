use std::sync::Arc;

use culture_core::ModuleCatalog;
use storage::repository::Storage;

use crate::celebration::CelebrationPresenter;
use crate::country::CountryService;
use crate::dispatcher::ModuleDispatcher;
use crate::error::AppServicesError;
use crate::narration::NarratorFactory;
use crate::profile::ProfileService;

/// Assembles app-facing services over one progress store and the built-in catalog.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<ModuleCatalog>,
    dispatcher: Arc<ModuleDispatcher>,
    profile: Arc<ProfileService>,
    country: Arc<CountryService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// built-in catalog is malformed.
    pub async fn new_sqlite(
        db_url: &str,
        narrators: Arc<dyn NarratorFactory>,
        celebrations: Arc<dyn CelebrationPresenter>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(&storage, narrators, celebrations)
    }

    /// Build services over a process-local store. Nothing survives a restart.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Catalog` if the built-in catalog is malformed.
    pub fn in_memory(
        narrators: Arc<dyn NarratorFactory>,
        celebrations: Arc<dyn CelebrationPresenter>,
    ) -> Result<Self, AppServicesError> {
        Self::from_storage(&Storage::in_memory(), narrators, celebrations)
    }

    /// # Errors
    ///
    /// Returns `AppServicesError::Catalog` if the built-in catalog is malformed.
    pub fn from_storage(
        storage: &Storage,
        narrators: Arc<dyn NarratorFactory>,
        celebrations: Arc<dyn CelebrationPresenter>,
    ) -> Result<Self, AppServicesError> {
        let catalog = Arc::new(ModuleCatalog::builtin()?);
        let dispatcher = Arc::new(ModuleDispatcher::new(
            Arc::clone(&catalog),
            Arc::clone(&storage.progress),
            narrators,
            celebrations,
        ));
        let profile = Arc::new(ProfileService::new(
            Arc::clone(&catalog),
            Arc::clone(&storage.progress),
        ));
        let country = Arc::new(CountryService::new(Arc::clone(&storage.progress)));

        Ok(Self {
            catalog,
            dispatcher,
            profile,
            country,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<ModuleCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn dispatcher(&self) -> Arc<ModuleDispatcher> {
        Arc::clone(&self.dispatcher)
    }

    #[must_use]
    pub fn profile(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profile)
    }

    #[must_use]
    pub fn country(&self) -> Arc<CountryService> {
        Arc::clone(&self.country)
    }
}
