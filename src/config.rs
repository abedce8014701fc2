//! Application configuration
//!
//! Loaded from a TOML file. Every section and field has a default, so an
//! empty or missing file yields a runnable configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::infrastructure::crypto::password::{MAX_COST, MIN_COST};
use crate::infrastructure::DatabaseConfig;
use crate::shared::AppError;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "ACCOUNT_SERVICE_CONFIG";

/// Environment variable overriding `database.url`
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds in-flight requests get to finish after a shutdown signal
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
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
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        let defaults = DatabaseConfig::default();
        Self {
            url: defaults.url,
            max_connections: defaults.max_connections,
            min_connections: defaults.min_connections,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// `text` or `json`
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

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl SecurityConfig {
    /// Cost actually handed to bcrypt
    pub fn effective_bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.clamp(MIN_COST, MAX_COST)
    }
}

impl AppConfig {
    /// Load from `path`. A missing file gives the defaults. `DATABASE_URL`,
    /// when set, replaces `database.url` either way.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!("Failed to read {}: {}", path.display(), e))
            })?;
            Self::from_toml(&content)?
        } else {
            info!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            if !url.is_empty() {
                config.database.url = url;
            }
        }

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, AppError> {
        toml::from_str(content).map_err(|e| AppError::Config(format!("Invalid config: {}", e)))
    }

    /// Write this configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Config(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)
            .map_err(|e| AppError::Config(format!("Failed to write {}: {}", path.display(), e)))
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            min_connections: self.database.min_connections,
        }
    }
}

/// `<config dir>/account-service/config.toml`, or `./config.toml` when the
/// platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("account-service").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

/// Config path from `ACCOUNT_SERVICE_CONFIG`, falling back to
/// [`default_config_path`].
pub fn config_path_from_env() -> PathBuf {
    std::env::var(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_config_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.shutdown_timeout, 30);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.security.bcrypt_cost, bcrypt::DEFAULT_COST);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9090

            [database]
            url = "sqlite::memory:"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 10);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = AppConfig::from_toml("[server\nport = ").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn bcrypt_cost_is_clamped() {
        let low = SecurityConfig { bcrypt_cost: 1 };
        let high = SecurityConfig { bcrypt_cost: 99 };
        assert_eq!(low.effective_bcrypt_cost(), MIN_COST);
        assert_eq!(high.effective_bcrypt_cost(), MAX_COST);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = std::env::temp_dir().join(format!("account-service-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");

        let mut config = AppConfig::default();
        config.server.port = 7070;
        config.logging.format = "json".to_string();
        config.save(&path).unwrap();

        let loaded = AppConfig::from_toml(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.server.port, 7070);
        assert_eq!(loaded.logging.format, "json");

        std::fs::remove_dir_all(dir).unwrap();
    }
}
