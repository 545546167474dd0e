//! Store error types.

use thiserror::Error;

/// Errors that can occur in store operations.
///
/// The contract layer is backend-agnostic, so backends map their engine's
/// errors into these string-carrying variants. A missing key is never an
/// error anywhere in the crate.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be opened or created.
    #[error("failed to open store: {0}")]
    Open(String),

    /// The storage engine failed during an operation.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// The store could not be closed cleanly.
    #[error("failed to close store: {0}")]
    Close(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
