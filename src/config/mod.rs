//! Configuration loading and management
//!
//! Configuration can come from a YAML file, from environment variables, or
//! both (environment wins). The token signing secret has no default: a
//! missing secret is a startup error, never a silently generated key.

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET is not set; refusing to start without a signing secret")]
    MissingSecret,

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Token signing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Process-wide signing secret. Rotating it invalidates all sessions.
    pub secret: String,

    /// Token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,
}

/// Document store connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URI (e.g. "mongodb://localhost:27017")
    pub uri: String,

    /// Database name
    #[serde(default = "default_database_name")]
    pub name: String,
}

/// Complete service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    pub auth: AuthConfig,

    /// Absent → the in-memory backend is used
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_token_ttl() -> i64 {
    // 24 hours
    86_400
}

fn default_database_name() -> String {
    "taskdeck".to_string()
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env::var("JWT_SECRET").map_err(|_| ConfigError::MissingSecret)?;

        let mut config = Self {
            host: default_host(),
            port: default_port(),
            auth: AuthConfig {
                secret,
                token_ttl_secs: default_token_ttl(),
            },
            database: None,
        };
        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Load configuration: YAML file named by `TASKDECK_CONFIG` when set,
    /// plain environment otherwise. Environment variables always override
    /// file values.
    pub fn load() -> Result<Self, ConfigError> {
        match env::var("TASKDECK_CONFIG") {
            Ok(path) => {
                let mut config = Self::from_yaml_file(&path)?;
                config.apply_env_overrides()?;
                Ok(config)
            }
            Err(_) => Self::from_env(),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = env::var("HOST") {
            self.host = host;
        }

        if let Ok(port) = env::var("PORT") {
            self.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                value: port.clone(),
            })?;
        }

        if let Ok(secret) = env::var("JWT_SECRET") {
            self.auth.secret = secret;
        }

        if let Ok(ttl) = env::var("TOKEN_TTL_SECS") {
            self.auth.token_ttl_secs = ttl.parse().map_err(|_| ConfigError::InvalidValue {
                key: "TOKEN_TTL_SECS".to_string(),
                value: ttl.clone(),
            })?;
        }

        if let Ok(uri) = env::var("MONGODB_URI") {
            let name = env::var("MONGODB_DB").unwrap_or_else(|_| default_database_name());
            self.database = Some(DatabaseConfig { uri, name });
        }

        Ok(())
    }

    /// Socket address string to bind the listener to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_with_defaults() {
        let config = AppConfig::from_yaml_str(
            r#"
auth:
  secret: test-secret
"#,
        )
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.auth.secret, "test-secret");
        assert_eq!(config.auth.token_ttl_secs, 86_400);
        assert!(config.database.is_none());
    }

    #[test]
    fn test_yaml_full() {
        let config = AppConfig::from_yaml_str(
            r#"
host: 127.0.0.1
port: 8080
auth:
  secret: test-secret
  token_ttl_secs: 900
database:
  uri: mongodb://localhost:27017
  name: taskdeck_test
"#,
        )
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.auth.token_ttl_secs, 900);
        let db = config.database.unwrap();
        assert_eq!(db.uri, "mongodb://localhost:27017");
        assert_eq!(db.name, "taskdeck_test");
    }

    #[test]
    fn test_yaml_missing_secret_fails() {
        assert!(AppConfig::from_yaml_str("port: 8080").is_err());
    }

    #[test]
    fn test_yaml_serialization_round_trip() {
        let config = AppConfig::from_yaml_str(
            r#"
auth:
  secret: test-secret
"#,
        )
        .unwrap();

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = AppConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed.port, config.port);
        assert_eq!(parsed.auth.secret, config.auth.secret);
    }
}
