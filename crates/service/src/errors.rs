use models::errors::ModelError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unprocessable: {0}")]
    Unprocessable(String),

    #[error("database error: {0}")]
    Db(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ServiceError {
    pub fn not_found(what: impl Into<String>) -> Self {
        ServiceError::NotFound(what.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ServiceError::Validation(msg.into())
    }
}

/// Translate constraint violations raised by an insert or update into the
/// client-facing error they stand for. Unique clashes become conflicts,
/// broken references become validation errors.
pub(crate) fn map_write_err(e: DbErr, conflict_msg: &str) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::Conflict(conflict_msg.to_string()),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            ServiceError::Validation("referenced record does not exist".to_string())
        }
        _ => ServiceError::Db(e.to_string()),
    }
}
