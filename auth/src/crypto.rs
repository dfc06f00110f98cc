//! Shared cryptographic primitives.

use argon2::password_hash::rand_core;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;

/// Fill a fresh buffer with bytes from the operating system CSPRNG.
///
/// # Errors
/// The OS source is unavailable.
pub fn random_bytes(len: usize) -> Result<Vec<u8>, rand_core::Error> {
    let mut bytes = vec![0u8; len];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(bytes)
}

/// Compare two byte slices in time independent of where they first differ.
///
/// Slices of different length compare unequal immediately; length is not secret.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
