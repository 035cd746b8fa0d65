//! Shop API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::{IpAddr, SocketAddr};

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8001;

/// Shop API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    /// HTTP listen port (`FLIPSHOP_PORT`, then `PORT`)
    pub port: u16,

    /// Interface to bind (`FLIPSHOP_BIND_ADDR`)
    pub bind_addr: IpAddr,

    /// Reported by `/health` (`FLIPSHOP_VERSION`)
    pub version: String,

    /// Seed catalog as JSON (`FLIPSHOP_INVENTORY_JSON`); defaults when unset
    pub inventory_json: Option<String>,
}

impl ShopConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. `load` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("FLIPSHOP_PORT").or_else(|| lookup("PORT")) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("FLIPSHOP_PORT".to_string()))?,
            None => DEFAULT_PORT,
        };

        let bind_addr = lookup("FLIPSHOP_BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0".to_string())
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue("FLIPSHOP_BIND_ADDR".to_string()))?;

        let version = lookup("FLIPSHOP_VERSION")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "dev".to_string());

        Ok(ShopConfig {
            port,
            bind_addr,
            version,
            inventory_json: lookup("FLIPSHOP_INVENTORY_JSON"),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

impl Default for ShopConfig {
    fn default() -> Self {
        ShopConfig {
            port: DEFAULT_PORT,
            bind_addr: IpAddr::from([0, 0, 0, 0]),
            version: "dev".to_string(),
            inventory_json: None,
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
