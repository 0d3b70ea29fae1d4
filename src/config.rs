//! Application configuration.
//!
//! Configuration is stored in `.storefront/config.yaml` (or the file named by
//! `STOREFRONT_CONFIG`) and includes:
//! - Catalog API endpoint
//! - Listing page size
//! - Search debounce delay
//! - Remote request timeout

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StorefrontError};
use crate::types::{DEFAULT_DEBOUNCE_MS, DEFAULT_PAGE_SIZE};

/// Default product catalog endpoint.
pub const DEFAULT_API_URL: &str = "https://api.escuelajs.co/api/v1/products";

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "STOREFRONT_CONFIG";

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "STOREFRONT_API_URL";

/// Keys accepted by `config get` / `config set`.
pub const VALID_KEYS: &[&str] = &[
    "api.base_url",
    "catalog.page_size",
    "search.debounce_ms",
    "remote_timeout",
];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub search: SearchConfig,

    /// Remote operation timeout in seconds (default: 30)
    #[serde(default = "default_remote_timeout")]
    pub remote_timeout: u64,
}

fn default_remote_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            catalog: CatalogConfig::default(),
            search: SearchConfig::default(),
            remote_timeout: default_remote_timeout(),
        }
    }
}

/// Catalog API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Listing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Products per page (default: 9)
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period in milliseconds before a typed term is applied (default: 500)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_PATH_ENV)
            && !path.is_empty()
        {
            return PathBuf::from(path);
        }
        PathBuf::from(".storefront").join("config.yaml")
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            StorefrontError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                StorefrontError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            StorefrontError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        Ok(())
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.catalog.page_size == 0 {
            return Err(StorefrontError::Config(
                "catalog.page_size must be at least 1".to_string(),
            ));
        }
        if self.remote_timeout == 0 {
            return Err(StorefrontError::Config(
                "remote_timeout must be at least 1 second".to_string(),
            ));
        }
        url::Url::parse(&self.api.base_url).map_err(|e| {
            StorefrontError::Config(format!(
                "api.base_url '{}' is not a valid URL: {e}",
                self.api.base_url
            ))
        })?;
        Ok(())
    }

    /// Catalog endpoint, preferring the environment override.
    pub fn api_url(&self) -> String {
        if let Ok(url) = env::var(API_URL_ENV)
            && !url.is_empty()
        {
            return url;
        }
        self.api.base_url.clone()
    }

    pub fn page_size(&self) -> usize {
        self.catalog.page_size
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    /// Get the remote operation timeout duration
    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout)
    }

    /// Read a value by dot-notation key.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "api.base_url" => Ok(self.api.base_url.clone()),
            "catalog.page_size" => Ok(self.catalog.page_size.to_string()),
            "search.debounce_ms" => Ok(self.search.debounce_ms.to_string()),
            "remote_timeout" => Ok(self.remote_timeout.to_string()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a value by dot-notation key, validating the result.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => self.api.base_url = value.to_string(),
            "catalog.page_size" => self.catalog.page_size = parse_number(key, value)?,
            "search.debounce_ms" => self.search.debounce_ms = parse_number(key, value)?,
            "remote_timeout" => self.remote_timeout = parse_number(key, value)?,
            _ => return Err(unknown_key(key)),
        }
        self.validate()
    }
}

fn unknown_key(key: &str) -> StorefrontError {
    StorefrontError::Config(format!(
        "unknown config key '{key}'. Valid keys: {}",
        VALID_KEYS.join(", ")
    ))
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        StorefrontError::Config(format!("'{value}' is not a valid number for {key}"))
    })
}
