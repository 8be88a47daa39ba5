use async_trait::async_trait;
use culture_core::model::{
    CountryName, CountryProgress, ModuleKey, Percent, UserId, UserProgress,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by progress store adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("remote read failed: {0}")]
    ReadFailed(String),

    #[error("remote write failed: {0}")]
    WriteFailed(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Remote document store holding per-user lesson progress.
///
/// Persisted field names: `completedModule`, `selectedCountry` and
/// `progress.<country>.<moduleKey>`.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Fetch the user's progress record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the user has no record yet.
    async fn read_user(&self, user: &UserId) -> Result<UserProgress, StorageError>;

    /// Atomically set `completedModule = max(completedModule, candidate)`.
    ///
    /// Creates the record if missing. Returns the stored value after the update.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the update cannot be applied.
    async fn ratchet_completed_module(
        &self,
        user: &UserId,
        candidate: u32,
    ) -> Result<u32, StorageError>;

    /// Merge a single `progress[country][module] = percent` entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn set_module_progress(
        &self,
        user: &UserId,
        country: &CountryName,
        module: &ModuleKey,
        percent: Percent,
    ) -> Result<(), StorageError>;

    /// All module percentages recorded for `country`. Empty if none.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the read fails.
    async fn read_country_progress(
        &self,
        user: &UserId,
        country: &CountryName,
    ) -> Result<CountryProgress, StorageError>;

    /// Merge `selectedCountry` into the user's record, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn set_selected_country(
        &self,
        user: &UserId,
        country: &CountryName,
    ) -> Result<(), StorageError>;
}

/// Simple in-memory store for tests and offline runs.
#[derive(Clone, Default)]
pub struct InMemoryProgressStore {
    users: Arc<Mutex<HashMap<UserId, UserProgress>>>,
    progress: Arc<Mutex<HashMap<(UserId, CountryName), CountryProgress>>>,
}

impl InMemoryProgressStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressStore for InMemoryProgressStore {
    async fn read_user(&self, user: &UserId) -> Result<UserProgress, StorageError> {
        let guard = self
            .users
            .lock()
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;
        guard.get(user).cloned().ok_or(StorageError::NotFound)
    }

    async fn ratchet_completed_module(
        &self,
        user: &UserId,
        candidate: u32,
    ) -> Result<u32, StorageError> {
        let mut guard = self
            .users
            .lock()
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        let record = guard.entry(user.clone()).or_default();
        record.completed_module = record.completed_module.max(candidate);
        Ok(record.completed_module)
    }

    async fn set_module_progress(
        &self,
        user: &UserId,
        country: &CountryName,
        module: &ModuleKey,
        percent: Percent,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        guard
            .entry((user.clone(), country.clone()))
            .or_default()
            .insert(module.clone(), percent);
        Ok(())
    }

    async fn read_country_progress(
        &self,
        user: &UserId,
        country: &CountryName,
    ) -> Result<CountryProgress, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;
        Ok(guard
            .get(&(user.clone(), country.clone()))
            .cloned()
            .unwrap_or_default())
    }

    async fn set_selected_country(
        &self,
        user: &UserId,
        country: &CountryName,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .users
            .lock()
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        guard.entry(user.clone()).or_default().selected_country = Some(country.clone());
        Ok(())
    }
}

/// Progress store behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            progress: Arc::new(InMemoryProgressStore::new()),
        }
    }
}
