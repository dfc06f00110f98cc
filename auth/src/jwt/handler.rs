use chrono::Utc;
use jsonwebtoken::Header;
use serde::Serialize;

use super::claims::Claims;
use super::config::JwtConfig;
use super::errors::JwtError;
use super::signer;
use super::token::parse_token;
use super::token::split_token;
use super::token::ParsedToken;
use super::token::SEGMENT_DELIMITER;
use super::validation::validate_claims;
use crate::base64url;

/// Mint a signed token for `claims`.
///
/// The header and payload are serialized to compact JSON, each encoded as a
/// base64url segment, and the MAC is computed over the exact
/// `header.payload` text that goes on the wire.
///
/// # Arguments
/// * `claims` - Payload; must satisfy `exp > iat >= nbf`
/// * `config` - Signing policy
///
/// # Returns
/// Compact token `header.payload.signature`
///
/// # Errors
/// * `EncodingFailed` - JSON serialization failed
/// * `UnsupportedAlgorithm` - Config names a non-HMAC algorithm
/// * `CryptoFailed` - MAC could not be keyed
pub fn create(claims: &Claims, config: &JwtConfig) -> Result<String, JwtError> {
    debug_assert!(
        claims.has_ordered_timestamps(),
        "claims must satisfy exp > iat >= nbf"
    );

    let header = Header::new(config.algorithm());
    let mut token = encode_segment(&header)?;
    token.push(SEGMENT_DELIMITER);
    token.push_str(&encode_segment(claims)?);

    let signature = signer::sign(config.algorithm(), config.secret(), token.as_bytes())?;
    let signature = base64url::encode(&signature).map_err(JwtError::from_segment)?;

    token.push(SEGMENT_DELIMITER);
    token.push_str(&signature);
    Ok(token)
}

/// Verify a token against the system clock.
///
/// See [`verify_at`].
pub fn verify(token: &str, config: &JwtConfig) -> Result<Claims, JwtError> {
    verify_at(token, config, Utc::now().timestamp())
}

/// Verify a token's signature and claims at `now` (Unix seconds).
///
/// Steps, each short-circuiting: split into three segments, check the header
/// names the configured algorithm, recompute the MAC over the original
/// `header.payload` bytes and compare in constant time, decode and parse the
/// payload, then run [`validate_claims`]. The payload is not decoded before
/// the MAC comparison, so any edit to it is an `InvalidSignature`.
///
/// # Errors
/// * `InvalidFormat` - Wrong segment count or undecodable header/payload
/// * `UnsupportedAlgorithm` - Header algorithm differs from the config
/// * `InvalidSignature` - MAC mismatch or malformed signature segment
/// * `NotYetValid`, `TokenExpired`, `InvalidIssuer`, `InvalidAudience` - Claim checks
pub fn verify_at(token: &str, config: &JwtConfig, now: i64) -> Result<Claims, JwtError> {
    let parsed = split_token(token)?;

    let header = parsed.decode_header()?;
    if header.alg != config.algorithm() {
        return Err(JwtError::UnsupportedAlgorithm(format!("{:?}", header.alg)));
    }

    verify_signature(&parsed, config)?;

    let claims = parsed.decode_unverified_claims()?;
    validate_claims(&claims, config, now)?;
    Ok(claims)
}

fn verify_signature(parsed: &ParsedToken, config: &JwtConfig) -> Result<(), JwtError> {
    let signature = parsed.decode_signature()?;
    let valid = signer::verify(
        config.algorithm(),
        config.secret(),
        parsed.signing_input().as_bytes(),
        &signature,
    )?;

    if valid {
        Ok(())
    } else {
        Err(JwtError::InvalidSignature)
    }
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, JwtError> {
    let json = serde_json::to_vec(value).map_err(|e| JwtError::EncodingFailed(e.to_string()))?;
    base64url::encode(&json).map_err(JwtError::from_segment)
}

/// JWT token handler bound to one [`JwtConfig`].
///
/// Uses HS256 unless the config selects HS384 or HS512.
#[derive(Debug, Clone)]
pub struct JwtHandler {
    config: JwtConfig,
}

impl JwtHandler {
    /// Create a new JWT handler.
    ///
    /// # Errors
    /// * `InvalidConfig` / `UnsupportedAlgorithm` - Config fails validation
    ///
    /// # Security Notes
    /// - Store secrets in environment variables or secure vaults, never in code
    /// - Rotating the secret invalidates every outstanding token
    pub fn new(config: JwtConfig) -> Result<Self, JwtError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    /// Build claims for a user issued at `now`, using the configured expiry,
    /// issuer and audience.
    pub fn claims_for(&self, user_id: u64, username: &str, role: &str, now: i64) -> Claims {
        let mut claims =
            Claims::for_user(user_id, username, role, now, self.config.default_expiry());
        claims.iss = self.config.issuer().map(str::to_string);
        claims.aud = self.config.audience().map(str::to_string);
        claims
    }

    /// Encode claims into a signed token.
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        create(claims, &self.config)
    }

    /// Decode and fully validate a token against the system clock.
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        verify(token, &self.config)
    }

    /// Decode and fully validate a token at `now`.
    pub fn decode_at(&self, token: &str, now: i64) -> Result<Claims, JwtError> {
        verify_at(token, &self.config, now)
    }

    /// Decode token without validation (for inspection only).
    ///
    /// # Security Warning
    /// This does NOT validate the token signature or any claim. Only use for:
    /// - Debugging/logging purposes
    /// - Never trust claims from this method for authorization decisions
    pub fn decode_unverified(&self, token: &str) -> Result<Claims, JwtError> {
        parse_token(token)?.decode_unverified_claims()
    }
}
