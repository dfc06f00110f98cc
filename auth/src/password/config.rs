use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use super::errors::PasswordError;

pub const MIN_SALT_LENGTH: u32 = 8;
pub const MAX_SALT_LENGTH: u32 = 1024;
pub const MIN_HASH_LENGTH: u32 = 16;
pub const MAX_HASH_LENGTH: u32 = 1024;

/// Key-derivation function used for a password hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PasswordAlgorithm {
    /// PBKDF2 with HMAC-SHA256.
    #[default]
    #[serde(rename = "PBKDF2-SHA256")]
    Pbkdf2Sha256,

    /// PBKDF2 with HMAC-SHA512.
    #[serde(rename = "PBKDF2-SHA512")]
    Pbkdf2Sha512,

    /// Argon2id v0x13; `iterations` is the time cost.
    #[serde(rename = "ARGON2ID")]
    Argon2id,
}

impl PasswordAlgorithm {
    /// Stable identifier stamped into hash records.
    pub fn as_str(&self) -> &'static str {
        match self {
            PasswordAlgorithm::Pbkdf2Sha256 => "PBKDF2-SHA256",
            PasswordAlgorithm::Pbkdf2Sha512 => "PBKDF2-SHA512",
            PasswordAlgorithm::Argon2id => "ARGON2ID",
        }
    }

    /// Lowest iteration count accepted for this algorithm.
    pub fn min_iterations(&self) -> u32 {
        match self {
            PasswordAlgorithm::Pbkdf2Sha256 | PasswordAlgorithm::Pbkdf2Sha512 => 1_000,
            PasswordAlgorithm::Argon2id => 1,
        }
    }
}

impl fmt::Display for PasswordAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PasswordAlgorithm {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            PasswordAlgorithm::Pbkdf2Sha256,
            PasswordAlgorithm::Pbkdf2Sha512,
            PasswordAlgorithm::Argon2id,
        ]
        .into_iter()
        .find(|algorithm| algorithm.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| PasswordError::InvalidParams(format!("Unknown algorithm: {}", s)))
    }
}

/// Password hashing policy.
///
/// Immutable once handed to a [`PasswordHasher`](super::PasswordHasher) or an
/// [`AuthContext`](crate::AuthContext).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    pub iterations: u32,
    pub salt_length: u32,
    pub hash_length: u32,
    pub algorithm: PasswordAlgorithm,
}

impl PasswordConfig {
    /// Check the policy against the accepted bounds.
    ///
    /// # Errors
    /// * `InvalidParams` - Iterations, salt length or hash length out of range
    pub fn validate(&self) -> Result<(), PasswordError> {
        check_params(
            self.algorithm,
            self.iterations,
            self.salt_length as usize,
            self.hash_length as usize,
        )
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            iterations: 600_000,
            salt_length: 16,
            hash_length: 32,
            algorithm: PasswordAlgorithm::Pbkdf2Sha256,
        }
    }
}

pub(crate) fn check_params(
    algorithm: PasswordAlgorithm,
    iterations: u32,
    salt_length: usize,
    hash_length: usize,
) -> Result<(), PasswordError> {
    if iterations < algorithm.min_iterations() {
        return Err(PasswordError::InvalidParams(format!(
            "{} requires at least {} iterations, got {}",
            algorithm,
            algorithm.min_iterations(),
            iterations
        )));
    }

    if !(MIN_SALT_LENGTH as usize..=MAX_SALT_LENGTH as usize).contains(&salt_length) {
        return Err(PasswordError::InvalidParams(format!(
            "Salt length must be between {} and {} bytes, got {}",
            MIN_SALT_LENGTH, MAX_SALT_LENGTH, salt_length
        )));
    }

    if !(MIN_HASH_LENGTH as usize..=MAX_HASH_LENGTH as usize).contains(&hash_length) {
        return Err(PasswordError::InvalidParams(format!(
            "Hash length must be between {} and {} bytes, got {}",
            MIN_HASH_LENGTH, MAX_HASH_LENGTH, hash_length
        )));
    }

    Ok(())
}
