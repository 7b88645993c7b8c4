//! Configuration module for kundapay-server.
//!
//! Handles loading configuration from TOML files, CLI arguments,
//! and environment variables.

pub mod file;

use crate::config::file::{FileConfig, LimitConfig, LimitSide, StoreBackend};
use kundapay_core::quote::{LimitPolicy, LimitRule, LimitScope};
use rust_decimal::Decimal;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("DATABASE_URL environment variable not set")]
    MissingDatabaseUrl,
}

pub struct ServerConfig {
    pub listen: SocketAddr,
}

pub struct StoreConfig {
    pub backend: StoreBackend,
    /// `None` when caching is disabled.
    pub cache_ttl: Option<Duration>,
}

/// Loaded configuration result containing all parts.
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub debounce: Duration,
    pub limits: LimitPolicy,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: std::path::PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    /// 4. Build the loaded configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        self.load_str(&config_content)
    }

    /// Reload the configuration (used during SIGHUP).
    pub fn reload(&self) -> Result<LoadedConfig, ConfigError> {
        self.load()
    }

    fn load_str(&self, content: &str) -> Result<LoadedConfig, ConfigError> {
        let mut file_config: FileConfig = toml::from_str(content)?;

        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }

        self.validate(&file_config)?;
        Ok(self.build_loaded_config(file_config))
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        for limit in &config.limits {
            if limit.ceiling <= Decimal::ZERO {
                return Err(ConfigError::ValidationError(format!(
                    "limit for {} must have a positive ceiling",
                    limit.country
                )));
            }
            if limit.description.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "limit for {} has an empty description",
                    limit.country
                )));
            }
        }
        Ok(())
    }

    fn build_loaded_config(&self, file_config: FileConfig) -> LoadedConfig {
        let cache_ttl = match file_config.store.cache_ttl_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        LoadedConfig {
            server: ServerConfig {
                listen: file_config.server.listen,
            },
            store: StoreConfig {
                backend: file_config.store.backend,
                cache_ttl,
            },
            debounce: Duration::from_millis(file_config.quotes.debounce_ms),
            limits: LimitPolicy::new(file_config.limits.into_iter().map(convert_limit).collect()),
        }
    }
}

fn convert_limit(limit: LimitConfig) -> LimitRule {
    let scope = match limit.scope {
        LimitSide::Origin => LimitScope::Origin(limit.country),
        LimitSide::Destination => LimitScope::Destination(limit.country),
    };
    LimitRule {
        scope,
        ceiling: limit.ceiling,
        currency: limit.currency,
        reference: Some(limit.description),
    }
}

/// Get the database URL from the environment.
pub fn get_database_url() -> Result<String, ConfigError> {
    std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader() -> ConfigLoader {
        ConfigLoader::new("./kundapay-config.toml", None)
    }

    #[test]
    fn test_defaults_match_built_in_policy() {
        let loaded = loader().load_str("").unwrap();
        assert_eq!(loaded.limits, LimitPolicy::kundapay_defaults());
        assert_eq!(loaded.debounce, Duration::from_millis(500));
        assert_eq!(loaded.store.cache_ttl, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_listen_override() {
        let addr: SocketAddr = "127.0.0.1:9999".parse().unwrap();
        let loaded = ConfigLoader::new("unused.toml", Some(addr))
            .load_str("[server]\nlisten = \"0.0.0.0:1\"")
            .unwrap();
        assert_eq!(loaded.server.listen, addr);
    }

    #[test]
    fn test_zero_ttl_disables_cache() {
        let loaded = loader().load_str("[store]\ncache_ttl_secs = 0").unwrap();
        assert_eq!(loaded.store.cache_ttl, None);
    }

    #[test]
    fn test_rejects_bad_limits() {
        let zero_ceiling = r#"
[[limits]]
scope = "origin"
country = "GA"
ceiling = 0
currency = "XAF"
description = "nothing"
"#;
        assert!(matches!(
            loader().load_str(zero_ceiling),
            Err(ConfigError::ValidationError(_))
        ));

        let blank = r#"
[[limits]]
scope = "origin"
country = "GA"
ceiling = 1000
currency = "XAF"
description = "  "
"#;
        assert!(matches!(
            loader().load_str(blank),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let loader = ConfigLoader::new("/nonexistent/kundapay-config.toml", None);
        assert!(matches!(loader.load(), Err(ConfigError::IoError(_))));
    }
}
