//! Configuration module
//!
//! Settings are read from a TOML file (default:
//! `~/.config/textgen-gateway/config.toml`) and then overridden by a small
//! set of environment variables so secrets never have to live in the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Default location of the configuration file
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("textgen-gateway")
        .join("config.toml")
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Database URL (e.g., "sqlite://./gateway.db?mode=rwc")
    pub url: String,
    pub max_connections: Option<u32>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://./gateway.db?mode=rwc".to_string(),
            max_connections: None,
        }
    }
}

/// Token signing and password hashing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    /// Session token lifetime in days
    pub token_ttl_days: i64,
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_days: 30,
            bcrypt_cost: 10,
        }
    }
}

/// Upstream text-generation provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub url: String,
    pub api_key: String,
    pub default_model: String,
    pub max_tokens: u32,
    /// Credits charged per successful `/generate-text` call
    pub flat_cost: i64,
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "https://bothub.chat/api/v2/openai/v1".to_string(),
            api_key: String::new(),
            default_model: "gpt-4".to_string(),
            max_tokens: 100,
            flat_cost: 100,
            timeout_secs: 60,
        }
    }
}

/// `/stream` notifier settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub interval_ms: u64,
    pub message: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            message: "Tokens received".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn, error
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Bootstrap administrator, created on startup when missing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
    #[serde(default = "default_admin_name")]
    pub first_name: String,
    #[serde(default = "default_admin_name")]
    pub last_name: String,
}

fn default_admin_name() -> String {
    "Admin".to_string()
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub security: SecurityConfig,
    pub upstream: UpstreamConfig,
    pub stream: StreamConfig,
    pub logging: LoggingConfig,
    pub admin: Option<AdminConfig>,
}

impl AppConfig {
    /// Load from `path`, falling back to defaults when the file does not
    /// exist, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Apply `PORT`, `DATABASE_URL`, `JWT_SECRET`, `UPSTREAM_URL` and
    /// `UPSTREAM_API_KEY` on top of the file values.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.security.jwt_secret = secret;
        }
        if let Some(url) = lookup("UPSTREAM_URL") {
            self.upstream.url = url;
        }
        if let Some(key) = lookup("UPSTREAM_API_KEY") {
            self.upstream.api_key = key;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "security.jwt_secret must be set (or JWT_SECRET exported)".into(),
            ));
        }
        if self.security.token_ttl_days <= 0 {
            return Err(ConfigError::Invalid(
                "security.token_ttl_days must be positive".into(),
            ));
        }
        if !(4..=31).contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::Invalid(
                "security.bcrypt_cost must be within 4..=31".into(),
            ));
        }
        if self.stream.interval_ms == 0 {
            return Err(ConfigError::Invalid("stream.interval_ms must be > 0".into()));
        }
        if self.upstream.flat_cost < 0 {
            return Err(ConfigError::Invalid(
                "upstream.flat_cost must not be negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.security.token_ttl_days, 30);
        assert_eq!(cfg.security.bcrypt_cost, 10);
        assert_eq!(cfg.upstream.flat_cost, 100);
        assert_eq!(cfg.upstream.default_model, "gpt-4");
        assert_eq!(cfg.stream.interval_ms, 1000);
        assert!(cfg.admin.is_none());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            port = 8081

            [security]
            jwt_secret = "s3cret"

            [admin]
            email = "root@example.com"
            password = "changeme"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.port, 8081);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.security.jwt_secret, "s3cret");
        assert_eq!(cfg.security.token_ttl_days, 30);
        let admin = cfg.admin.unwrap();
        assert_eq!(admin.first_name, "Admin");
    }

    #[test]
    fn env_overrides_win() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(|key| match key {
            "PORT" => Some("9999".into()),
            "JWT_SECRET" => Some("from-env".into()),
            "UPSTREAM_API_KEY" => Some("key".into()),
            _ => None,
        });

        assert_eq!(cfg.server.port, 9999);
        assert_eq!(cfg.security.jwt_secret, "from-env");
        assert_eq!(cfg.upstream.api_key, "key");
        assert_eq!(cfg.database.url, DatabaseSettings::default().url);
    }

    #[test]
    fn unparsable_port_is_ignored() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(|key| (key == "PORT").then(|| "not-a-port".to_string()));
        assert_eq!(cfg.server.port, 3000);
    }

    #[test]
    fn validate_requires_secret() {
        let mut cfg = AppConfig::default();
        assert!(cfg.validate().is_err());

        cfg.security.jwt_secret = "secret".into();
        assert!(cfg.validate().is_ok());

        cfg.security.bcrypt_cost = 2;
        assert!(cfg.validate().is_err());
    }
}
