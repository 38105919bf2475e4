//! Configuration Module
//!
//! Handles loading shell configuration from environment variables.

use std::env;
use std::time::Duration;

pub const DEFAULT_CACHE_TTL_SECS: u64 = 10;
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2/";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Shell configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Cache TTL in seconds, also the sweep period
    pub cache_ttl: u64,
    /// Base URL of the PokeAPI, always ending in `/`
    pub api_base_url: String,
    /// Per-request timeout in seconds
    pub http_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_CACHE_TTL_SECS` - Cache TTL in seconds (default: 10, zero is ignored)
    /// - `POKEAPI_BASE_URL` - PokeAPI base URL (default: https://pokeapi.co/api/v2/)
    /// - `POKEDEX_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        Self {
            cache_ttl: env::var("POKEDEX_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ttl| *ttl > 0)
                .unwrap_or(DEFAULT_CACHE_TTL_SECS),
            api_base_url: env::var("POKEAPI_BASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty())
                .map(|url| normalize_base_url(&url))
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            http_timeout: env::var("POKEDEX_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL_SECS,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            http_timeout: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

/// Ensures a base URL ends with exactly one `/` so paths can be appended.
pub fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim().trim_end_matches('/'))
}
