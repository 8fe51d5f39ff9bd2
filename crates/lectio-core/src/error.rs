use thiserror::Error;

use lectio_store::StoreError;

/// Errors produced by the service layer.
///
/// All variants are terminal for the request that triggered them; nothing is
/// retried locally.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A month name outside the 12 canonical names.
    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    /// A required field was missing or malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The identifier did not resolve to a stored manual.
    #[error("Manual not found")]
    NotFound,

    /// The store could not complete an operation.
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => CoreError::NotFound,
            other => CoreError::Store(other),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CoreError>;
