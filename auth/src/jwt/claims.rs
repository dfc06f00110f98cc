use serde::Deserialize;
use serde::Serialize;

/// Signed assertions carried in a token payload.
///
/// Timestamps are Unix seconds. A freshly minted token satisfies
/// `exp > iat >= nbf`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Host-assigned user identifier
    pub user_id: u64,

    pub username: String,

    /// Role tag, e.g. "admin" or "user"
    pub role: String,

    /// Expiration time
    pub exp: i64,

    /// Issued at
    pub iat: i64,

    /// Not before
    pub nbf: i64,

    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Audience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

impl Claims {
    /// Create claims for a user, valid from `now` for `expiry_secs` seconds.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `username` - Username
    /// * `role` - Role tag
    /// * `now` - Issue time (Unix seconds)
    /// * `expiry_secs` - Seconds until token expires
    ///
    /// # Returns
    /// Claims with `iat = nbf = now` and `exp = now + expiry_secs`
    pub fn for_user(
        user_id: u64,
        username: impl Into<String>,
        role: impl Into<String>,
        now: i64,
        expiry_secs: u64,
    ) -> Self {
        let expiry = i64::try_from(expiry_secs).unwrap_or(i64::MAX);

        Self {
            user_id,
            username: username.into(),
            role: role.into(),
            exp: now.saturating_add(expiry),
            iat: now,
            nbf: now,
            iss: None,
            aud: None,
        }
    }

    /// Set not-before (Unix timestamp).
    pub fn with_not_before(mut self, nbf: i64) -> Self {
        self.nbf = nbf;
        self
    }

    /// Set issuer.
    pub fn with_issuer(mut self, iss: impl Into<String>) -> Self {
        self.iss = Some(iss.into());
        self
    }

    /// Set audience.
    pub fn with_audience(mut self, aud: impl Into<String>) -> Self {
        self.aud = Some(aud.into());
        self
    }

    /// Whether `exp > iat >= nbf` holds.
    pub fn has_ordered_timestamps(&self) -> bool {
        self.exp > self.iat && self.iat >= self.nbf
    }
}
