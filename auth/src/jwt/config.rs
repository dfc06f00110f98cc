use std::fmt;

use jsonwebtoken::Algorithm;
use zeroize::Zeroize;
use zeroize::ZeroizeOnDrop;

use super::errors::JwtError;
use super::signer;

/// Minimum shared-secret length in bytes.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Shared HMAC key. Zeroed on drop and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret(Vec<u8>);

impl Secret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn expose(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Secret").field(&"[REDACTED]").finish()
    }
}

/// Signing and validation policy.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    secret: Secret,
    default_expiry: u64,
    issuer: Option<String>,
    audience: Option<String>,
    algorithm: Algorithm,
    leeway: u64,
}

impl JwtConfig {
    /// Create an HS256 policy with no issuer or audience binding.
    ///
    /// # Arguments
    /// * `secret` - Shared key, at least [`MIN_SECRET_LENGTH`] bytes
    /// * `default_expiry` - Token lifetime in seconds
    ///
    /// # Errors
    /// * `InvalidConfig` - Secret too short or zero expiry
    pub fn new(secret: impl Into<Vec<u8>>, default_expiry: u64) -> Result<Self, JwtError> {
        let config = Self {
            secret: Secret::new(secret),
            default_expiry,
            issuer: None,
            audience: None,
            algorithm: Algorithm::HS256,
            leeway: 0,
        };
        config.validate()?;
        Ok(config)
    }

    /// Require and stamp this issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Require and stamp this audience.
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Clock-skew tolerance in seconds applied to `nbf` and `exp`.
    pub fn with_leeway(mut self, leeway: u64) -> Self {
        self.leeway = leeway;
        self
    }

    /// Select the HMAC algorithm.
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Anything other than HS256, HS384 or HS512
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Result<Self, JwtError> {
        signer::ensure_supported(algorithm)?;
        self.algorithm = algorithm;
        Ok(self)
    }

    /// Check the policy.
    ///
    /// # Errors
    /// * `InvalidConfig` - Secret too short or zero expiry
    /// * `UnsupportedAlgorithm` - Non-HMAC algorithm
    pub fn validate(&self) -> Result<(), JwtError> {
        if self.secret.len() < MIN_SECRET_LENGTH {
            return Err(JwtError::InvalidConfig(format!(
                "secret must be at least {} bytes, got {}",
                MIN_SECRET_LENGTH,
                self.secret.len()
            )));
        }
        if self.default_expiry == 0 {
            return Err(JwtError::InvalidConfig(
                "default expiry must be non-zero".to_string(),
            ));
        }
        signer::ensure_supported(self.algorithm)
    }

    pub fn secret(&self) -> &[u8] {
        self.secret.expose()
    }

    pub fn secret_len(&self) -> usize {
        self.secret.len()
    }

    pub fn default_expiry(&self) -> u64 {
        self.default_expiry
    }

    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    pub fn audience(&self) -> Option<&str> {
        self.audience.as_deref()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn leeway(&self) -> u64 {
        self.leeway
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[test]
    fn test_new_config_defaults() {
        let config = JwtConfig::new(SECRET, 3_600).expect("Invalid config");

        assert_eq!(config.secret(), SECRET);
        assert_eq!(config.secret_len(), SECRET.len());
        assert_eq!(config.default_expiry(), 3_600);
        assert_eq!(config.algorithm(), Algorithm::HS256);
        assert_eq!(config.leeway(), 0);
        assert!(config.issuer().is_none());
        assert!(config.audience().is_none());
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = JwtConfig::new(b"short".to_vec(), 3_600);
        assert!(matches!(result, Err(JwtError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_expiry_rejected() {
        let result = JwtConfig::new(SECRET, 0);
        assert!(matches!(result, Err(JwtError::InvalidConfig(_))));
    }

    #[test]
    fn test_error_does_not_leak_secret() {
        let err = JwtConfig::new(b"tiny-secret".to_vec(), 3_600).unwrap_err();
        assert!(!err.to_string().contains("tiny-secret"));
    }

    #[test]
    fn test_algorithm_selection() {
        let config = JwtConfig::new(SECRET, 60)
            .unwrap()
            .with_algorithm(Algorithm::HS512)
            .expect("HS512 should be accepted");
        assert_eq!(config.algorithm(), Algorithm::HS512);

        let result = JwtConfig::new(SECRET, 60)
            .unwrap()
            .with_algorithm(Algorithm::RS256);
        assert!(matches!(result, Err(JwtError::UnsupportedAlgorithm(_))));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = JwtConfig::new(SECRET, 60).unwrap();
        let debug_output = format!("{:?}", config);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("my_secret_key"));
    }
}
