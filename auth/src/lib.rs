//! Authentication library
//!
//! Provides the credential and session logic a host application embeds:
//! - Unpadded URL-safe base64 codec used to frame tokens
//! - Salted password hashing (PBKDF2-HMAC-SHA2 or Argon2id)
//! - HMAC-signed JWT tokens with ordered claim validation
//! - Login, request authentication and password management
//!
//! The host owns persistence through the [`UserStore`] trait and owns the
//! HTTP layer; this crate only consumes a raw `Cookie` header value.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use deadlight_auth::{PasswordConfig, PasswordHasher};
//!
//! let hasher = PasswordHasher::new(PasswordConfig {
//!     iterations: 1_000,
//!     ..PasswordConfig::default()
//! })
//! .unwrap();
//! let record = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &record).is_ok());
//! assert!(hasher.verify("not_my_password", &record).is_err());
//! ```
//!
//! ## JWT Tokens
//! ```
//! use deadlight_auth::{JwtConfig, JwtHandler};
//!
//! let config = JwtConfig::new(b"secret_key_at_least_32_bytes_long!".to_vec(), 3_600)
//!     .unwrap()
//!     .with_issuer("deadlight");
//! let handler = JwtHandler::new(config).unwrap();
//!
//! let claims = handler.claims_for(42, "alice", "user", chrono::Utc::now().timestamp());
//! let token = handler.encode(&claims).unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded.user_id, 42);
//! ```
//!
//! ## Settings
//! ```
//! use deadlight_auth::Settings;
//!
//! let context = Settings::from_toml_str(
//!     r#"
//!     [jwt]
//!     secret = "secret_key_at_least_32_bytes_long!"
//!     expiry = 900
//!     "#,
//! )
//! .unwrap()
//! .into_context()
//! .unwrap();
//! assert_eq!(context.cookie_name(), "session");
//! ```

pub mod authenticator;
pub mod base64url;
pub mod context;
pub mod cookie;
pub mod crypto;
pub mod jwt;
pub mod password;
pub mod settings;
pub mod store;

// Re-export commonly used items
pub use authenticator::AuthenticatedUser;
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use context::AuthContext;
pub use jwt::Claims;
pub use jwt::JwtConfig;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordAlgorithm;
pub use password::PasswordConfig;
pub use password::PasswordError;
pub use password::PasswordHashRecord;
pub use password::PasswordHasher;
pub use settings::Settings;
pub use settings::SettingsError;
pub use store::NewUser;
pub use store::StoreError;
pub use store::User;
pub use store::UserStore;
