use diesel::r2d2::PoolError;
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No connection to the store could be obtained.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// The store rejected or failed a query.
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    /// A stored value violates a domain constraint.
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("migration failed: {0}")]
    Migration(String),
}

impl From<PoolError> for RepositoryError {
    fn from(value: PoolError) -> Self {
        Self::Unavailable(value.to_string())
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
