use deadpool_postgres::{BuildError, PoolError};
use thiserror::Error;

// Lowest level error type, wrapping errors from the database layer only.
#[derive(Debug, Error)]
pub enum DbError {
    /// Record not found
    #[error("not found")]
    NotFound,

    /// Unique constraint violation
    #[error("unique violation")]
    UniqueViolation,

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Pg(#[from] tokio_postgres::Error),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("row decode error: {0}")]
    Decode(String),

    #[error("input error: {0}")]
    Validation(String),
}
