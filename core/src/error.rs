//! Error types for the food log store.

use thiserror::Error;

/// Result type for food log store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the persistence layer.
///
/// Nothing is retried internally; every failure reaches the caller as one of
/// these kinds.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not be opened, its schema could not be ensured, or an
    /// operation was attempted while the service was not open.
    #[error("Store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    /// Malformed input reached a write operation.
    #[error("Invalid food item: {0}")]
    Validation(String),

    /// The storage engine rejected a well-formed statement.
    #[error("Query failed: {0}")]
    QueryFailure(#[from] rusqlite::Error),

    /// The blocking task running a statement did not complete.
    #[error("Store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl StoreError {
    pub(crate) fn unavailable(reason: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            reason: reason.into(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
