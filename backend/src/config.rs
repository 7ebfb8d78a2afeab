//! Service configuration.
//!
//! Settings are read from a TOML file and then selectively overridden by
//! environment variables. Every field has a default, so an empty file (or no
//! file at all) yields a runnable configuration backed by the mock upstreams.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::providers::DEFAULT_HTTP_TIMEOUT;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FLIGHT_SEARCH_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Start the canned upstream servers alongside the API
    #[serde(default = "default_true")]
    pub mock_upstreams: bool,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Aggregation deadline and cache freshness window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_aggregation_timeout_ms")]
    pub aggregation_timeout_ms: u64,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

/// One upstream registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// `airasia` | `batik` | `garuda` | `lion`
    pub kind: String,
    pub base_url: String,
    #[serde(default = "default_provider_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_aggregation_timeout_ms() -> u64 {
    5_000
}

fn default_cache_ttl_secs() -> u64 {
    180
}

fn default_provider_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT.as_millis() as u64
}

fn default_providers() -> Vec<ProviderSettings> {
    vec![
        ProviderSettings::new("airasia", "http://127.0.0.1:8081"),
        ProviderSettings::new("batik", "http://127.0.0.1:8082"),
        ProviderSettings::new("garuda", "http://127.0.0.1:8083"),
        ProviderSettings::new("lion", "http://127.0.0.1:8084"),
    ]
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            aggregation_timeout_ms: default_aggregation_timeout_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl SearchSettings {
    pub fn aggregation_timeout(&self) -> Duration {
        Duration::from_millis(self.aggregation_timeout_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl ProviderSettings {
    pub fn new(kind: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            base_url: base_url.into(),
            timeout_ms: default_provider_timeout_ms(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mock_upstreams: default_true(),
            server: ServerSettings::default(),
            search: SearchSettings::default(),
            providers: default_providers(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().display().to_string();
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path_str.clone(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path_str,
            source,
        })
    }

    /// Find `flight-search.toml` in the usual places.
    ///
    /// Searches:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn find_default_file() -> Option<PathBuf> {
        [
            PathBuf::from("flight-search.toml"),
            PathBuf::from("backend/flight-search.toml"),
            PathBuf::from("../flight-search.toml"),
        ]
        .into_iter()
        .find(|p| p.exists())
    }

    /// Resolve the configuration for the server binary.
    ///
    /// `FLIGHT_SEARCH_CONFIG` wins over the default search paths; with no file
    /// the built-in defaults are used. `HOST` and `PORT` are applied last.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => match Self::find_default_file() {
                Some(path) => Self::from_file(path)?,
                None => Self::default(),
            },
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `HOST` / `PORT` overrides.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT must be a valid port number".to_string()))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.aggregation_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "search.aggregation_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if let Some(p) = self.providers.iter().find(|p| p.base_url.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "provider '{}' has an empty base_url",
                p.kind
            )));
        }
        Ok(())
    }
}
