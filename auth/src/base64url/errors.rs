use thiserror::Error;

/// Error type for base64url encoding and decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base64UrlError {
    #[error("Invalid base64url input: {0}")]
    InvalidInput(String),

    #[error("Output buffer too small: need {needed} bytes, got {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("Failed to allocate {0} bytes")]
    Memory(usize),
}
