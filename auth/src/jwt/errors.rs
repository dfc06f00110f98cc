use thiserror::Error;

use crate::base64url::Base64UrlError;

/// Error type for JWT operations.
///
/// Claim validation failures are reported in check order: not-before,
/// expiry, issuer, audience. Messages never include the signing secret.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Token is malformed: {0}")]
    InvalidFormat(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is not valid yet")]
    NotYetValid,

    #[error("Token issuer does not match")]
    InvalidIssuer,

    #[error("Token audience does not match")]
    InvalidAudience,

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid JWT configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to allocate {0} bytes for token")]
    Memory(usize),

    #[error("Signing primitive failed: {0}")]
    CryptoFailed(String),
}

impl JwtError {
    /// Map a codec failure on a header or payload segment.
    pub(crate) fn from_segment(e: Base64UrlError) -> Self {
        match e {
            Base64UrlError::Memory(size) => JwtError::Memory(size),
            other => JwtError::InvalidFormat(other.to_string()),
        }
    }
}
