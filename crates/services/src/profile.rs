use std::sync::Arc;

use serde::Serialize;

use culture_core::ModuleCatalog;
use culture_core::model::{CountryName, ModuleKey, Percent, UserId};
use storage::repository::ProgressStore;

use crate::error::ProfileError;

/// One line of the profile's module list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleProgressEntry {
    pub module: ModuleKey,
    pub percent: Percent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileOverview {
    pub selected_country: Option<CountryName>,
    /// Recorded modules in catalog order; keys the catalog does not know come last.
    pub modules: Vec<ModuleProgressEntry>,
}

impl ProfileOverview {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Read-only view of a user's selected country and per-module progress.
#[derive(Clone)]
pub struct ProfileService {
    catalog: Arc<ModuleCatalog>,
    progress: Arc<dyn ProgressStore>,
}

impl ProfileService {
    #[must_use]
    pub fn new(catalog: Arc<ModuleCatalog>, progress: Arc<dyn ProgressStore>) -> Self {
        Self { catalog, progress }
    }

    /// # Errors
    ///
    /// Returns `ProfileError::UserNotFound` if the user has no record, or
    /// `ProfileError::Storage` if either read fails.
    pub async fn overview(&self, user: &UserId) -> Result<ProfileOverview, ProfileError> {
        let record = self.progress.read_user(user).await?;
        let Some(country) = record.selected_country else {
            log::debug!("{user} has not selected a country");
            return Ok(ProfileOverview {
                selected_country: None,
                modules: Vec::new(),
            });
        };

        let mut recorded = self.progress.read_country_progress(user, &country).await?;
        let mut modules = Vec::with_capacity(recorded.len());
        for module in self.catalog.iter() {
            if let Some(percent) = recorded.remove(module.key()) {
                modules.push(ModuleProgressEntry {
                    module: module.key().clone(),
                    percent,
                });
            }
        }
        modules.extend(
            recorded
                .into_iter()
                .map(|(module, percent)| ModuleProgressEntry { module, percent }),
        );

        Ok(ProfileOverview {
            selected_country: Some(country),
            modules,
        })
    }
}
