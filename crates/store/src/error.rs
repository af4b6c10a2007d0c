//! Store error model.

use thiserror::Error;

/// Result type used across the store layer.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence-level error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The targeted row does not exist.
    #[error("not found")]
    NotFound,

    /// Underlying database failure (unavailable, constraint violation, ...).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
