//! HMAC signing for the token's signing input.

use hmac::digest::KeyInit;
use hmac::Hmac;
use hmac::Mac;
use jsonwebtoken::Algorithm;
use sha2::Sha256;
use sha2::Sha384;
use sha2::Sha512;

use super::errors::JwtError;

pub(crate) fn ensure_supported(algorithm: Algorithm) -> Result<(), JwtError> {
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(()),
        other => Err(JwtError::UnsupportedAlgorithm(format!("{:?}", other))),
    }
}

/// Compute the raw MAC over `message`.
pub(crate) fn sign(
    algorithm: Algorithm,
    secret: &[u8],
    message: &[u8],
) -> Result<Vec<u8>, JwtError> {
    match algorithm {
        Algorithm::HS256 => sign_with::<Hmac<Sha256>>(secret, message),
        Algorithm::HS384 => sign_with::<Hmac<Sha384>>(secret, message),
        Algorithm::HS512 => sign_with::<Hmac<Sha512>>(secret, message),
        other => Err(JwtError::UnsupportedAlgorithm(format!("{:?}", other))),
    }
}

/// Check `signature` against the MAC over `message` in constant time.
pub(crate) fn verify(
    algorithm: Algorithm,
    secret: &[u8],
    message: &[u8],
    signature: &[u8],
) -> Result<bool, JwtError> {
    match algorithm {
        Algorithm::HS256 => verify_with::<Hmac<Sha256>>(secret, message, signature),
        Algorithm::HS384 => verify_with::<Hmac<Sha384>>(secret, message, signature),
        Algorithm::HS512 => verify_with::<Hmac<Sha512>>(secret, message, signature),
        other => Err(JwtError::UnsupportedAlgorithm(format!("{:?}", other))),
    }
}

fn keyed<M: Mac + KeyInit>(secret: &[u8]) -> Result<M, JwtError> {
    <M as Mac>::new_from_slice(secret).map_err(|e| JwtError::CryptoFailed(e.to_string()))
}

fn sign_with<M: Mac + KeyInit>(secret: &[u8], message: &[u8]) -> Result<Vec<u8>, JwtError> {
    let mut mac = keyed::<M>(secret)?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn verify_with<M: Mac + KeyInit>(
    secret: &[u8],
    message: &[u8],
    signature: &[u8],
) -> Result<bool, JwtError> {
    let mut mac = keyed::<M>(secret)?;
    mac.update(message);
    // verify_slice compares in constant time
    Ok(mac.verify_slice(signature).is_ok())
}
