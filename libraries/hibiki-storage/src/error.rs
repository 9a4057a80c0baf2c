/// Storage-specific errors
use thiserror::Error;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for hibiki_core::HibikiError {
    fn from(err: StorageError) -> Self {
        hibiki_core::HibikiError::storage(err.to_string())
    }
}
