//! HTTP transport for the Octopus Energy REST API
//!
//! Every verb goes through [`HttpClient::get_json`]: the path is joined onto
//! the base URL, the API key is applied, the throttle is honoured and one
//! request is sent. There are no retries; a non-success status becomes
//! [`Error::HttpStatus`] carrying the response body.

use super::rate_limit::Throttle;
use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Production endpoint of the Octopus Energy REST API
pub const DEFAULT_BASE_URL: &str = "https://api.octopus.energy/v1";

/// Transport settings
#[derive(Debug, Clone, PartialEq)]
pub struct HttpClientConfig {
    /// Prefix of every request path, including the `/v1` version segment
    pub base_url: String,
    pub timeout: Duration,
    /// Client-side request quota; `None` disables throttling
    pub requests_per_second: Option<u32>,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            requests_per_second: Some(10),
            user_agent: format!("octo-api/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn requests_per_second(mut self, rps: u32) -> Self {
        self.config.requests_per_second = Some(rps);
        self
    }

    pub fn no_rate_limit(mut self) -> Self {
        self.config.requests_per_second = None;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Authenticated, throttled JSON GET client
pub struct HttpClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
    authenticator: Authenticator,
    throttle: Option<Throttle>,
}

impl HttpClient {
    /// Client for the public endpoints, with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Fails with [`Error::InvalidUrl`] if the base URL does not parse
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim())?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url,
            timeout: config.timeout,
            authenticator: Authenticator::default(),
            throttle: config.requests_per_second.and_then(Throttle::per_second),
        })
    }

    pub fn with_auth(config: HttpClientConfig, auth: AuthConfig) -> Result<Self> {
        let mut client = Self::with_config(config)?;
        client.authenticator = Authenticator::new(auth);
        Ok(client)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn throttle(&self) -> Option<&Throttle> {
        self.throttle.as_ref()
    }

    /// GET `path` with `query` (sent in order) and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        let url = self.url_for(path)?;

        if let Some(throttle) = &self.throttle {
            throttle.acquire().await;
        }

        debug!(url = %url, ?query, "GET");
        let mut request = self.client.get(url.clone());
        if !query.is_empty() {
            request = request.query(query);
        }
        let request = self.authenticator.apply(request);

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                }
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Request rejected");
            return Err(Error::http_status(status.as_u16(), body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Join `path` onto the base URL, keeping the version prefix
    fn url_for(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("auth", self.authenticator.config())
            .field("throttle", &self.throttle)
            .finish_non_exhaustive()
    }
}
