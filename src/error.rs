use crate::db::error::DbError;
use crate::models::codec::CodecError;
use thiserror::Error;

pub type AppResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    /// The referenced session was destroyed, replaced or never existed.
    /// Surfaced to callers as its own result, never as gameplay narrative.
    #[error("invalid session")]
    InvalidSession,

    #[error("not logged in")]
    NotLoggedIn,

    #[error("not found")]
    NotFound,

    #[error("validation failed: {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    InternalError(String),
}
