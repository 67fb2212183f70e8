//! Client settings
//!
//! Settings are read from an optional YAML file, then overridden by the
//! environment and finally by command line flags.
//!
//! ```yaml
//! api_key: sk_live_xxxx
//! base_url: https://api.octopus.energy/v1
//! timeout_secs: 30
//! requests_per_second: 10
//! page_size: 100
//! ```

use crate::api::DEFAULT_PAGE_SIZE;
use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the account API key
pub const API_KEY_ENV: &str = "OCTOPUS_API_KEY";

/// Client settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Account API key; only needed for meter and consumption data
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Client-side request rate limit; `0` or `null` disables it
    #[serde(default = "default_rps")]
    pub requests_per_second: Option<u32>,

    /// Page size for paginated verbs
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            requests_per_second: default_rps(),
            page_size: default_page_size(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_rps() -> Option<u32> {
    Some(10)
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Settings {
    /// Load settings from a YAML file and apply the environment
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read settings file '{}': {e}",
                path.display()
            ))
        })?;

        let settings = Self::from_yaml(&content)?.apply_env();
        settings.validate()?;
        Ok(settings)
    }

    /// Parse and validate settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply overrides from the process environment
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    #[must_use]
    pub fn apply_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key.trim().to_string());
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::invalid_value("base_url", "cannot be empty"));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("base_url", e.to_string()))?;

        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be at least 1"));
        }
        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be at least 1"));
        }
        Ok(())
    }

    /// HTTP transport configuration
    pub fn http_config(&self) -> HttpClientConfig {
        let builder = HttpClientConfig::builder()
            .base_url(self.base_url.trim())
            .timeout(Duration::from_secs(self.timeout_secs));

        match self.requests_per_second.filter(|rps| *rps > 0) {
            Some(rps) => builder.requests_per_second(rps),
            None => builder.no_rate_limit(),
        }
        .build()
    }

    /// Credentials to send, if an API key is set
    pub fn auth_config(&self) -> AuthConfig {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => AuthConfig::api_key(key),
            _ => AuthConfig::None,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("requests_per_second", &self.requests_per_second)
            .field("page_size", &self.page_size)
            .finish()
    }
}
