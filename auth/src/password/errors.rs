use thiserror::Error;

/// Error type for password operations.
///
/// `VerificationFailed` is the ordinary "wrong password" outcome; the other
/// variants indicate a caller or environment problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Invalid password parameters: {0}")]
    InvalidParams(String),

    #[error("Password derivation failed: {0}")]
    CryptoFailed(String),

    #[error("Password verification failed")]
    VerificationFailed,
}

impl PasswordError {
    /// True for a plain credential mismatch.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, PasswordError::VerificationFailed)
    }
}
