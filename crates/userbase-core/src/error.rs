//! Error types for Userbase

use thiserror::Error;

pub type Result<T> = std::result::Result<T, UserbaseError>;

#[derive(Error, Debug)]
pub enum UserbaseError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl UserbaseError {
    /// Whether the failure originated in the backing store.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            UserbaseError::StorageUnavailable(_) | UserbaseError::Storage(_)
        )
    }
}
