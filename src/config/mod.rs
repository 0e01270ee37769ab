//! Configuration loading for smart-ticket
//!
//! Settings come from an optional YAML file layered under environment
//! variables; every field has a default so the service starts from an
//! empty directory. Environment variables use the `SMART_TICKET` prefix
//! with `__` between nesting levels, for example
//! `SMART_TICKET_SERVER__PORT` or `SMART_TICKET_AUTH__JWT_SECRET`.

use crate::error::Result;
use crate::identity::DEFAULT_TOKEN_TTL_MINUTES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding record files and the default config file
pub const DEFAULT_DATA_DIR: &str = ".smart-ticket";

/// Config file name looked up inside the data directory
pub const CONFIG_FILE: &str = "config.yaml";

/// Signing secrets shorter than this are refused at serve time
const MIN_SECRET_LEN: usize = 32;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    /// Company tags accepted at registration, matched exactly
    pub tenants: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            storage: StorageConfig::default(),
            tenants: vec![
                "CompanyA".to_string(),
                "CompanyB".to_string(),
                "CompanyC".to_string(),
            ],
        }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Token signing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret for session tokens; empty until configured
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
        }
    }
}

/// File storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl Config {
    /// Load configuration from a file layered under environment variables
    ///
    /// With no explicit path, `.smart-ticket/config.yaml` is read if it
    /// exists; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        builder = match path {
            Some(path) => builder.add_source(config::File::from(path)),
            None => {
                let default_path = Path::new(DEFAULT_DATA_DIR).join(CONFIG_FILE);
                builder.add_source(config::File::from(default_path).required(false))
            },
        };
        let settings = builder
            .add_source(
                config::Environment::with_prefix("SMART_TICKET")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Load from the default locations
    pub fn load_or_default() -> Result<Self> {
        Self::load(None)
    }

    /// Whether a company tag is accepted at registration
    #[must_use]
    pub fn is_known_tenant(&self, company: &str) -> bool {
        self.tenants.iter().any(|t| t == company)
    }

    /// Address the HTTP listener binds to
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Checks that must pass before the server may start
    pub fn validate_for_serve(&self) -> Result<()> {
        if self.auth.jwt_secret.len() < MIN_SECRET_LEN {
            return Err(config::ConfigError::Message(format!(
                "auth.jwt_secret must be at least {MIN_SECRET_LEN} characters; \
                 set SMART_TICKET_AUTH__JWT_SECRET"
            ))
            .into());
        }
        if self.tenants.is_empty() {
            return Err(
                config::ConfigError::Message("tenants must not be empty".to_string()).into(),
            );
        }
        Ok(())
    }
}
