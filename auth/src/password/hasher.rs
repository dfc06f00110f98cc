use argon2::Argon2;
use argon2::Params;
use argon2::Version;
use hmac::Hmac;
use sha2::Sha256;
use sha2::Sha512;
use zeroize::Zeroizing;

use super::config::check_params;
use super::config::PasswordAlgorithm;
use super::config::PasswordConfig;
use super::errors::PasswordError;
use super::record::PasswordHashRecord;
use crate::crypto;

/// Argon2id memory cost in KiB (19 MiB, OWASP baseline).
const ARGON2_MEMORY_KIB: u32 = 19_456;
const ARGON2_PARALLELISM: u32 = 1;

/// Password hashing bound to one policy.
///
/// Hashes with its own [`PasswordConfig`]; verifies with whatever parameters
/// the stored record carries.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    config: PasswordConfig,
}

impl PasswordHasher {
    /// Create a hasher for a validated policy.
    ///
    /// # Errors
    /// * `InvalidParams` - Policy fails [`PasswordConfig::validate`]
    pub fn new(config: PasswordConfig) -> Result<Self, PasswordError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PasswordConfig {
        &self.config
    }

    /// Hash a plaintext password with a fresh salt.
    pub fn hash(&self, password: &str) -> Result<PasswordHashRecord, PasswordError> {
        hash(password, &self.config)
    }

    /// Verify a plaintext password against a stored record.
    pub fn verify(&self, password: &str, record: &PasswordHashRecord) -> Result<(), PasswordError> {
        verify(password, record)
    }
}

/// Hash a plaintext password under `config`.
///
/// Every call draws a new salt from the OS CSPRNG.
///
/// # Arguments
/// * `password` - Plaintext password, must be non-empty
/// * `config` - Hashing policy
///
/// # Returns
/// A new [`PasswordHashRecord`] stamped with the policy's algorithm and iterations
///
/// # Errors
/// * `InvalidParams` - Empty password or out-of-range policy
/// * `CryptoFailed` - RNG or key derivation failed
pub fn hash(password: &str, config: &PasswordConfig) -> Result<PasswordHashRecord, PasswordError> {
    config.validate()?;
    require_password(password)?;

    let salt = generate_salt(config.salt_length)?;
    let key = derive_key(
        password,
        &salt,
        config.iterations,
        config.algorithm,
        config.hash_length as usize,
    )?;

    Ok(PasswordHashRecord {
        hash: key.to_vec(),
        salt,
        iterations: config.iterations,
        algorithm: config.algorithm,
    })
}

/// Verify a plaintext password against a stored record.
///
/// Re-derives with the record's salt, iterations and algorithm and compares
/// in constant time.
///
/// # Errors
/// * `VerificationFailed` - Password does not match
/// * `InvalidParams` - Empty password or malformed record
/// * `CryptoFailed` - Key derivation failed
pub fn verify(password: &str, record: &PasswordHashRecord) -> Result<(), PasswordError> {
    require_password(password)?;
    check_params(
        record.algorithm,
        record.iterations,
        record.salt.len(),
        record.hash.len(),
    )?;

    let candidate = derive_key(
        password,
        &record.salt,
        record.iterations,
        record.algorithm,
        record.hash.len(),
    )?;

    if crypto::constant_time_eq(&candidate, &record.hash) {
        Ok(())
    } else {
        Err(PasswordError::VerificationFailed)
    }
}

/// Draw `length` bytes of salt from the OS CSPRNG.
///
/// # Errors
/// * `InvalidParams` - `length` is zero
/// * `CryptoFailed` - RNG unavailable
pub fn generate_salt(length: u32) -> Result<Vec<u8>, PasswordError> {
    if length == 0 {
        return Err(PasswordError::InvalidParams(
            "Salt length must be non-zero".to_string(),
        ));
    }

    crypto::random_bytes(length as usize)
        .map_err(|e| PasswordError::CryptoFailed(format!("salt generation: {}", e)))
}

/// Derive `output_len` key bytes from a password.
///
/// The returned buffer is zeroed on drop.
///
/// # Errors
/// * `InvalidParams` - Empty password or salt, zero output, too few iterations
/// * `CryptoFailed` - Underlying primitive rejected its parameters
pub fn derive_key(
    password: &str,
    salt: &[u8],
    iterations: u32,
    algorithm: PasswordAlgorithm,
    output_len: usize,
) -> Result<Zeroizing<Vec<u8>>, PasswordError> {
    require_password(password)?;
    if salt.is_empty() {
        return Err(PasswordError::InvalidParams("Salt must not be empty".to_string()));
    }
    if output_len == 0 {
        return Err(PasswordError::InvalidParams(
            "Output length must be non-zero".to_string(),
        ));
    }
    if iterations < algorithm.min_iterations() {
        return Err(PasswordError::InvalidParams(format!(
            "{} requires at least {} iterations",
            algorithm,
            algorithm.min_iterations()
        )));
    }

    let mut output = Zeroizing::new(vec![0u8; output_len]);
    let password = password.as_bytes();

    match algorithm {
        PasswordAlgorithm::Pbkdf2Sha256 => {
            pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, iterations, &mut output)
                .map_err(|e| PasswordError::CryptoFailed(e.to_string()))?
        }
        PasswordAlgorithm::Pbkdf2Sha512 => {
            pbkdf2::pbkdf2::<Hmac<Sha512>>(password, salt, iterations, &mut output)
                .map_err(|e| PasswordError::CryptoFailed(e.to_string()))?
        }
        PasswordAlgorithm::Argon2id => {
            let params = Params::new(
                ARGON2_MEMORY_KIB,
                iterations,
                ARGON2_PARALLELISM,
                Some(output_len),
            )
            .map_err(|e| PasswordError::CryptoFailed(e.to_string()))?;

            Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params)
                .hash_password_into(password, salt, &mut output)
                .map_err(|e| PasswordError::CryptoFailed(e.to_string()))?
        }
    }

    Ok(output)
}

fn require_password(password: &str) -> Result<(), PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::InvalidParams(
            "Password must not be empty".to_string(),
        ));
    }
    Ok(())
}
