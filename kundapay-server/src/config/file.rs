//! TOML file configuration structures.
//!
//! These structs directly map to the `kundapay-config.toml` file format.

use kundapay_sdk::objects::{Country, Currency};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub quotes: QuotesConfig,
    /// Transfer ceilings. Leaving the key out keeps the built-in Gabon
    /// ceiling; `limits = []` disables every ceiling.
    #[serde(default = "default_limits")]
    pub limits: Vec<LimitConfig>,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080))
}

/// Where rates, fees and promo codes come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Postgres at `DATABASE_URL`.
    #[default]
    Postgres,
    /// Built-in tables, no database.
    Fixtures,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// How long rate and fee lookups are cached. `0` disables caching.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

fn default_cache_ttl_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotesConfig {
    /// Quiet period before a streamed quote request is calculated.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    500
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitSide {
    Origin,
    Destination,
}

/// One `[[limits]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitConfig {
    pub scope: LimitSide,
    pub country: Country,
    pub ceiling: Decimal,
    pub currency: Currency,
    /// Human equivalent shown next to the ceiling, e.g. "300 EUR".
    pub description: String,
}

fn default_limits() -> Vec<LimitConfig> {
    vec![LimitConfig {
        scope: LimitSide::Origin,
        country: Country::Ga,
        ceiling: Decimal::from(196_788),
        currency: Currency::Xaf,
        description: "300 EUR".to_owned(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"

[store]
backend = "fixtures"
cache_ttl_secs = 0

[quotes]
debounce_ms = 250

[[limits]]
scope = "origin"
country = "GA"
ceiling = 196788
currency = "XAF"
description = "300 EUR"

[[limits]]
scope = "destination"
country = "CN"
ceiling = "5000.00"
currency = "CNY"
description = "about 665 EUR"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.store.backend, StoreBackend::Fixtures);
        assert_eq!(config.store.cache_ttl_secs, 0);
        assert_eq!(config.quotes.debounce_ms, 250);
        assert_eq!(config.limits.len(), 2);
        assert_eq!(config.limits[1].scope, LimitSide::Destination);
        assert_eq!(config.limits[1].ceiling, Decimal::new(5000, 0));
    }

    #[test]
    fn test_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.listen, default_listen_addr());
        assert_eq!(config.store.backend, StoreBackend::Postgres);
        assert_eq!(config.store.cache_ttl_secs, 60);
        assert_eq!(config.quotes.debounce_ms, 500);
        assert_eq!(config.limits, default_limits());
    }

    #[test]
    fn test_empty_limits_disable_ceilings() {
        let config: FileConfig = toml::from_str("limits = []").unwrap();
        assert!(config.limits.is_empty());
    }
}
