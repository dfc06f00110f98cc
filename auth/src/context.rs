use crate::authenticator::AuthenticationError;
use crate::jwt::JwtConfig;
use crate::password::PasswordConfig;

/// Process-wide authentication settings.
///
/// Constructed once at startup and never mutated, so it can be shared by any
/// number of concurrent callers.
#[derive(Debug, Clone)]
pub struct AuthContext {
    jwt_config: JwtConfig,
    password_config: PasswordConfig,
    cookie_name: String,
    session_timeout: u32,
}

impl AuthContext {
    /// Validate and bundle the policies.
    ///
    /// # Arguments
    /// * `jwt_config` - Token signing and validation policy
    /// * `password_config` - Password hashing policy
    /// * `cookie_name` - Name of the cookie carrying the session token
    /// * `session_timeout` - Session lifetime in seconds, for the host's cookie handling
    ///
    /// # Errors
    /// * `JwtError` / `PasswordError` - A policy fails validation
    /// * `InvalidInput` - Empty or malformed cookie name, or zero timeout
    pub fn new(
        jwt_config: JwtConfig,
        password_config: PasswordConfig,
        cookie_name: impl Into<String>,
        session_timeout: u32,
    ) -> Result<Self, AuthenticationError> {
        jwt_config.validate()?;
        password_config.validate()?;

        let cookie_name = cookie_name.into();
        if cookie_name.is_empty()
            || cookie_name
                .chars()
                .any(|c| c == '=' || c == ';' || c.is_whitespace() || c.is_control())
        {
            return Err(AuthenticationError::InvalidInput(format!(
                "invalid cookie name: {:?}",
                cookie_name
            )));
        }
        if session_timeout == 0 {
            return Err(AuthenticationError::InvalidInput(
                "session timeout must be non-zero".to_string(),
            ));
        }

        Ok(Self {
            jwt_config,
            password_config,
            cookie_name,
            session_timeout,
        })
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    pub fn password_config(&self) -> &PasswordConfig {
        &self.password_config
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn session_timeout(&self) -> u32 {
        self.session_timeout
    }
}
