use std::env;
use std::fmt;
use std::sync::Arc;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use config::FileFormat;
use jsonwebtoken::Algorithm;
use serde::Deserialize;

use crate::authenticator::AuthenticationError;
use crate::context::AuthContext;
use crate::jwt::JwtConfig;
use crate::password::PasswordConfig;

/// File and environment backed settings for an [`AuthContext`].
///
/// ```toml
/// [password]
/// algorithm = "PBKDF2-SHA256"
/// iterations = 600000
///
/// [jwt]
/// secret = "..."
/// expiry = 86400
/// issuer = "deadlight"
///
/// [session]
/// cookie_name = "session"
/// ```
#[derive(Debug, Default, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
    pub password: PasswordConfig,
    pub jwt: JwtSettings,
    pub session: SessionSettings,
}

#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct JwtSettings {
    pub secret: String,
    /// Token lifetime in seconds.
    pub expiry: u64,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub algorithm: Algorithm,
    pub leeway: u64,
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            secret: String::new(),
            expiry: 86_400,
            issuer: None,
            audience: None,
            algorithm: Algorithm::HS256,
            leeway: 0,
        }
    }
}

impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"[REDACTED]")
            .field("expiry", &self.expiry)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("algorithm", &self.algorithm)
            .field("leeway", &self.leeway)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionSettings {
    pub cookie_name: String,
    /// Cookie lifetime in seconds.
    pub timeout: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cookie_name: "session".to_string(),
            timeout: 86_400,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] ConfigError),

    #[error("Invalid settings: {0}")]
    Invalid(#[from] AuthenticationError),
}

impl Settings {
    /// Load settings from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (AUTH__JWT__SECRET, AUTH__PASSWORD__ITERATIONS, etc.)
    /// 2. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(
                Environment::with_prefix("AUTH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        configuration.try_deserialize()
    }

    /// Parse settings from a TOML document, without file or environment layering.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        ConfigBuilder::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Validate the settings and build the shared context.
    ///
    /// # Errors
    /// * `Invalid` - Secret too short, unsupported algorithm, out-of-range
    ///   password policy or malformed session settings
    pub fn into_context(self) -> Result<Arc<AuthContext>, SettingsError> {
        let mut jwt_config = JwtConfig::new(self.jwt.secret.into_bytes(), self.jwt.expiry)
            .map_err(AuthenticationError::from)?
            .with_algorithm(self.jwt.algorithm)
            .map_err(AuthenticationError::from)?
            .with_leeway(self.jwt.leeway);
        if let Some(issuer) = self.jwt.issuer {
            jwt_config = jwt_config.with_issuer(issuer);
        }
        if let Some(audience) = self.jwt.audience {
            jwt_config = jwt_config.with_audience(audience);
        }

        let context = AuthContext::new(
            jwt_config,
            self.password,
            self.session.cookie_name,
            self.session.timeout,
        )?;

        tracing::debug!(
            algorithm = %context.password_config().algorithm,
            iterations = context.password_config().iterations,
            cookie_name = context.cookie_name(),
            "Authentication context configured"
        );
        Ok(Arc::new(context))
    }
}
