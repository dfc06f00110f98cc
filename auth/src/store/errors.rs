use thiserror::Error;

/// Error reported by the host's user store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("User not found: {0}")]
    NotFound(u64),

    #[error("Storage error: {0}")]
    Backend(String),
}
