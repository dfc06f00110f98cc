use super::claims::Claims;
use super::config::JwtConfig;
use super::errors::JwtError;

/// Check the validity window at `now` (Unix seconds).
///
/// Not-before is checked first, then expiry. `leeway` widens both edges.
///
/// # Errors
/// * `NotYetValid` - `now + leeway < nbf`
/// * `TokenExpired` - `now >= exp + leeway`
pub fn validate_timing(claims: &Claims, now: i64, leeway: u64) -> Result<(), JwtError> {
    let leeway = i64::try_from(leeway).unwrap_or(i64::MAX);

    if now.saturating_add(leeway) < claims.nbf {
        return Err(JwtError::NotYetValid);
    }
    if now >= claims.exp.saturating_add(leeway) {
        return Err(JwtError::TokenExpired);
    }
    Ok(())
}

/// Run every claim check in order: timing, issuer, audience.
///
/// The first failure is returned. Issuer and audience are only checked when
/// the config names one, and then must match exactly.
pub fn validate_claims(claims: &Claims, config: &JwtConfig, now: i64) -> Result<(), JwtError> {
    validate_timing(claims, now, config.leeway())?;

    if let Some(expected) = config.issuer() {
        if claims.iss.as_deref() != Some(expected) {
            return Err(JwtError::InvalidIssuer);
        }
    }

    if let Some(expected) = config.audience() {
        if claims.aud.as_deref() != Some(expected) {
            return Err(JwtError::InvalidAudience);
        }
    }

    Ok(())
}
