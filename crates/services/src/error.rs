//! Shared error types for the services crate.

use thiserror::Error;

use culture_core::catalog::CatalogError;
use culture_core::lesson::PagerError;
use culture_core::model::ProgressError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

use crate::narration::NarrationUnavailable;

/// Errors emitted by `LessonSession`. None of them end the session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LessonError {
    #[error(transparent)]
    NarrationUnavailable(#[from] NarrationUnavailable),
    #[error(transparent)]
    Pager(#[from] PagerError),
}

/// Errors emitted by `ModuleDispatcher` before a lesson could be opened.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DispatchError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Why the "module opened" progress write did not happen.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressWriteError {
    #[error("no country selected to save module progress")]
    NoCountrySelected,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CountryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CountryError {
    #[error("{0} is not supported yet; only United Arab Emirates has lessons")]
    Unsupported(String),
    #[error(transparent)]
    InvalidName(#[from] ProgressError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProfileService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("user data not found")]
    UserNotFound,
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for ProfileError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => ProfileError::UserNotFound,
            other => ProfileError::Storage(other),
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
