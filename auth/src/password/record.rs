use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::config::PasswordAlgorithm;
use super::errors::PasswordError;
use crate::base64url;

/// A verifiable password credential.
///
/// Created once per password-set event and replaced wholesale on change.
/// Verification always uses the record's own salt, iteration count and
/// algorithm, never the current policy.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHashRecord {
    pub hash: Vec<u8>,
    pub salt: Vec<u8>,
    pub iterations: u32,
    pub algorithm: PasswordAlgorithm,
}

impl PasswordHashRecord {
    /// Serialize for storage as `ALGORITHM$iterations$salt$hash` with
    /// base64url-encoded salt and hash.
    ///
    /// # Errors
    /// * `CryptoFailed` - Encoding buffer could not be allocated
    pub fn to_storage_string(&self) -> Result<String, PasswordError> {
        let salt = base64url::encode(&self.salt)
            .map_err(|e| PasswordError::CryptoFailed(e.to_string()))?;
        let hash = base64url::encode(&self.hash)
            .map_err(|e| PasswordError::CryptoFailed(e.to_string()))?;

        Ok(format!(
            "{}${}${}${}",
            self.algorithm, self.iterations, salt, hash
        ))
    }

    /// Parse a record previously produced by [`to_storage_string`](Self::to_storage_string).
    ///
    /// # Errors
    /// * `InvalidParams` - Wrong field count, unknown algorithm or bad encoding
    pub fn from_storage_string(s: &str) -> Result<Self, PasswordError> {
        let fields: Vec<&str> = s.split('$').collect();
        let [algorithm, iterations, salt, hash] = fields.as_slice() else {
            return Err(PasswordError::InvalidParams(
                "Stored hash must have four fields".to_string(),
            ));
        };

        let algorithm = algorithm.parse::<PasswordAlgorithm>()?;
        let iterations = iterations.parse::<u32>().map_err(|_| {
            PasswordError::InvalidParams("Stored iteration count is not a number".to_string())
        })?;
        let salt = base64url::decode(salt)
            .map_err(|_| PasswordError::InvalidParams("Stored salt is malformed".to_string()))?;
        let hash = base64url::decode(hash)
            .map_err(|_| PasswordError::InvalidParams("Stored hash is malformed".to_string()))?;

        Ok(Self {
            hash,
            salt,
            iterations,
            algorithm,
        })
    }
}

impl fmt::Debug for PasswordHashRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHashRecord")
            .field("hash", &"[HASH]")
            .field("salt", &"[SALT]")
            .field("iterations", &self.iterations)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}
