//! Core error types for the ratewatch pipeline.
//!
//! Module-specific errors (persistence, readiness) live next to the code that
//! raises them and are aggregated here for callers that want a single type.

use thiserror::Error;

use ratewatch_extract::CatalogError;

use crate::query::NotReadyError;
use crate::snapshot::PersistenceError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the refresh-and-cache pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("{0}")]
    NotReady(#[from] NotReadyError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
