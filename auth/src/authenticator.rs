use std::sync::Arc;

use chrono::Utc;

use crate::context::AuthContext;
use crate::cookie::extract_cookie;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::store::NewUser;
use crate::store::StoreError;
use crate::store::User;
use crate::store::UserStore;

/// Authentication coordinator combining password verification and JWT generation.
///
/// The only component that talks to the host's [`UserStore`]. Holds no
/// mutable state; share it behind an `Arc` across requests.
pub struct Authenticator<S>
where
    S: UserStore,
{
    store: Arc<S>,
    context: Arc<AuthContext>,
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    pub user: User,

    /// JWT access token
    pub token: String,
}

/// Identity recovered from a verified token.
///
/// A snapshot of the claims at mint time; role or username changes on the
/// host are not reflected until the user logs in again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: u64,
    pub username: String,
    pub role: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
            role: claims.role,
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }
}

/// Authentication operation errors.
///
/// Login failures of any kind collapse into `InvalidCredentials`; the
/// specific reason is only logged.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Authentication failed")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing session cookie")]
    MissingSessionCookie,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),

    #[error("User store error: {0}")]
    StoreError(#[from] StoreError),
}

impl<S> Authenticator<S>
where
    S: UserStore,
{
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `context` - Validated process-wide settings
    /// * `store` - Host user persistence
    ///
    /// # Returns
    /// Configured Authenticator instance
    ///
    /// # Errors
    /// * `PasswordError` / `JwtError` - A policy in the context is invalid
    pub fn new(context: Arc<AuthContext>, store: Arc<S>) -> Result<Self, AuthenticationError> {
        let password_hasher = PasswordHasher::new(context.password_config().clone())?;
        let jwt_handler = JwtHandler::new(context.jwt_config().clone())?;

        Ok(Self {
            store,
            context,
            password_hasher,
            jwt_handler,
        })
    }

    pub fn context(&self) -> &AuthContext {
        &self.context
    }

    /// Verify credentials and mint a session token.
    ///
    /// # Arguments
    /// * `username` - Username to log in as
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// The user (with `last_login` updated) and a signed token expiring after
    /// the configured default expiry
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user, inactive user or wrong password
    /// * `PasswordError` - Key derivation failed
    /// * `JwtError` - Token generation failed
    /// * `StoreError` - User lookup failed
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let mut user = match self.store.find_by_username(username).await? {
            Some(user) if user.is_active => user,
            Some(user) => {
                self.burn_derivation(password);
                tracing::info!(user_id = user.id, reason = "inactive", "Login rejected");
                return Err(AuthenticationError::InvalidCredentials);
            }
            None => {
                self.burn_derivation(password);
                tracing::info!(reason = "unknown_user", "Login rejected");
                return Err(AuthenticationError::InvalidCredentials);
            }
        };

        match self.password_hasher.verify(password, &user.password_hash) {
            Ok(()) => {}
            Err(PasswordError::VerificationFailed) => {
                tracing::info!(user_id = user.id, reason = "wrong_password", "Login rejected");
                return Err(AuthenticationError::InvalidCredentials);
            }
            Err(PasswordError::InvalidParams(e)) => {
                tracing::warn!(user_id = user.id, error = %e, "Login rejected: unusable credential");
                return Err(AuthenticationError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        }

        let now = Utc::now();
        let claims =
            self.jwt_handler
                .claims_for(user.id, &user.username, &user.role, now.timestamp());
        let token = self.jwt_handler.encode(&claims)?;

        match self.store.update_last_login(user.id, now).await {
            Ok(()) => user.last_login = Some(now),
            Err(e) => {
                tracing::warn!(user_id = user.id, error = %e, "Failed to record last login");
            }
        }

        tracing::info!(user_id = user.id, expires_at = claims.exp, "Login succeeded");
        Ok(AuthenticationResult { user, token })
    }

    /// Validate a token and recover the identity it carries.
    ///
    /// # Errors
    /// * `JwtError` - Malformed, forged, expired or mis-bound token
    pub fn verify_token(&self, token: &str) -> Result<AuthenticatedUser, AuthenticationError> {
        self.verify_token_at(token, Utc::now().timestamp())
    }

    /// Validate a token at `now` (Unix seconds).
    pub fn verify_token_at(
        &self,
        token: &str,
        now: i64,
    ) -> Result<AuthenticatedUser, AuthenticationError> {
        let claims = self.jwt_handler.decode_at(token, now).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            e
        })?;

        Ok(AuthenticatedUser::from(claims))
    }

    /// Authenticate a request from its raw `Cookie` header.
    ///
    /// # Errors
    /// * `MissingSessionCookie` - No non-empty cookie with the configured name
    /// * `JwtError` - Token validation failed
    pub fn check_request(
        &self,
        cookie_header: &str,
    ) -> Result<AuthenticatedUser, AuthenticationError> {
        let token = extract_cookie(cookie_header, self.context.cookie_name())
            .filter(|token| !token.is_empty())
            .ok_or(AuthenticationError::MissingSessionCookie)?;

        self.verify_token(token)
    }

    /// End a session.
    ///
    /// Tokens are stateless: this does not invalidate `token`, which stays
    /// valid until it expires. Hosts needing server-side revocation must keep
    /// their own deny list and clear the session cookie.
    pub fn logout(&self, token: &str) {
        let user_id = self
            .jwt_handler
            .decode_unverified(token)
            .map(|claims| claims.user_id)
            .ok();
        tracing::debug!(?user_id, "Logout requested; token remains valid until expiry");
    }

    /// Hash a password and ask the store to persist a new user.
    ///
    /// Duplicate usernames are detected by the store, not here.
    ///
    /// # Errors
    /// * `InvalidInput` - Empty password, or blank username or role
    /// * `PasswordError` - Hashing failed
    /// * `StoreError` - Persisting failed (including duplicate username)
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        role: &str,
    ) -> Result<User, AuthenticationError> {
        require_non_blank("username", username)?;
        require_non_empty("password", password)?;
        require_non_blank("role", role)?;

        let password_hash = self.password_hasher.hash(password)?;
        let user = self
            .store
            .create(NewUser {
                username: username.to_string(),
                role: role.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "User created");
        Ok(user)
    }

    /// Replace a user's password after checking the current one.
    ///
    /// On success `user.password_hash` holds the freshly salted record that
    /// was persisted.
    ///
    /// # Errors
    /// * `InvalidInput` - Empty new password
    /// * `InvalidCredentials` - `old_password` does not match
    /// * `PasswordError` - Hashing failed
    /// * `StoreError` - Persisting failed
    pub async fn change_password(
        &self,
        user: &mut User,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AuthenticationError> {
        require_non_empty("new password", new_password)?;

        match self.password_hasher.verify(old_password, &user.password_hash) {
            Ok(()) => {}
            Err(PasswordError::CryptoFailed(e)) => {
                return Err(PasswordError::CryptoFailed(e).into());
            }
            Err(e) => {
                tracing::info!(user_id = user.id, error = %e, "Password change rejected");
                return Err(AuthenticationError::InvalidCredentials);
            }
        }

        let record = self.password_hasher.hash(new_password)?;
        self.store.update_password(user.id, &record).await?;
        user.password_hash = record;

        tracing::info!(user_id = user.id, "Password changed");
        Ok(())
    }

    /// Spend one key derivation on a rejected login so it costs the same as
    /// a wrong password.
    fn burn_derivation(&self, password: &str) {
        let _ = self.password_hasher.hash(password);
    }
}

/// Passwords are opaque: whitespace is significant, only emptiness is rejected.
fn require_non_empty(field: &str, value: &str) -> Result<(), AuthenticationError> {
    if value.is_empty() {
        return Err(AuthenticationError::InvalidInput(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}

fn require_non_blank(field: &str, value: &str) -> Result<(), AuthenticationError> {
    if value.trim().is_empty() {
        return Err(AuthenticationError::InvalidInput(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}
