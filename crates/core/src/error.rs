use thiserror::Error;

use crate::catalog::CatalogError;
use crate::lesson::{DeckError, PagerError};
use crate::model::{IdError, ProgressError};

/// Any domain-level error, for callers that do not care which layer failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Id(#[from] IdError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Pager(#[from] PagerError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
