//! Configuration for the vendorhub server.
//!
//! Values come from (highest precedence first) `VENDORHUB_`-prefixed
//! environment variables, a TOML file and the built-in defaults. A `.env`
//! file in the working directory is loaded into the environment beforehand.
//! Nested keys use `__` in variable names, e.g. `VENDORHUB_SESSION__SECRET`.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};

/// Default configuration file name, resolved against the working directory.
pub const CONFIG_FILE_NAME: &str = "vendorhub.toml";

/// Secret shipped in the defaults; the server warns when it is still in use.
pub const DEFAULT_SESSION_SECRET: &str = "default-secret-key";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub reviews: ReviewConfig,
    pub polls: PollConfig,
    pub bootstrap: BootstrapConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the HTTP listener binds to.
    pub addr: String,
    /// Origin allowed by CORS, with credentials.
    pub cors_origin: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Mongo,
    /// Process-local tables, lost on restart.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: Backend,
    pub uri: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// HMAC secret for session tokens.
    pub secret: String,
    pub ttl_hours: i64,
    /// Adds `Secure; SameSite=None` to the session cookie.
    pub secure_cookie: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// New reviews start `approved` instead of `pending`.
    pub auto_approve: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub default_duration_days: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Account that receives `admin` and `super_admin` when it signs up.
    pub super_admin_email: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8000".to_string(),
            cors_origin: "http://localhost:5173".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Mongo,
            uri: "mongodb://localhost:27017".to_string(),
            name: "vendorhub".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SESSION_SECRET.to_string(),
            ttl_hours: 24,
            secure_cookie: false,
        }
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self { auto_approve: true }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            default_duration_days: 7,
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or validation fails.
    pub fn load_from(config_path: Option<&Path>) -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let config_file = config_path.map_or_else(|| PathBuf::from(CONFIG_FILE_NAME), Path::to_path_buf);

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("VENDORHUB_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError` naming the first invalid value.
    pub fn validate(&self) -> AppResult<()> {
        if self.session.secret.trim().is_empty() {
            return Err(AppError::ConfigError("session.secret must not be empty".to_string()));
        }

        if self.session.ttl_hours <= 0 {
            return Err(AppError::ConfigError("session.ttl_hours must be greater than 0".to_string()));
        }

        if self.polls.default_duration_days <= 0 {
            return Err(AppError::ConfigError(
                "polls.default_duration_days must be greater than 0".to_string(),
            ));
        }

        if self.database.backend == Backend::Mongo {
            if self.database.uri.trim().is_empty() {
                return Err(AppError::ConfigError("database.uri must be set for the mongo backend".to_string()));
            }
            if self.database.name.trim().is_empty() {
                return Err(AppError::ConfigError("database.name must be set for the mongo backend".to_string()));
            }
        }

        Ok(())
    }

    /// Whether `email` is the configured bootstrap super admin.
    pub fn is_bootstrap_admin(&self, email: &str) -> bool {
        self.bootstrap
            .super_admin_email
            .as_deref()
            .is_some_and(|configured| configured.trim().eq_ignore_ascii_case(email))
    }
}
