//! Configuration Module
//!
//! Handles loading the Pokedex configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default catalog API root.
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Runtime configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache TTL in seconds, also the reaper sweep interval
    pub cache_ttl_secs: u64,
    /// Root URL of the catalog API, without trailing slash
    pub api_base_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_SECS` - Cache entry lifetime in seconds (default: 60)
    /// - `POKEAPI_BASE_URL` - Catalog API root (default: https://pokeapi.co/api/v2)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl_secs: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl_secs),
            api_base_url: env::var("POKEAPI_BASE_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.api_base_url),
        }
    }

    /// Cache TTL as a `Duration`.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl_secs: 60,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}
