//! HTTP client module
//!
//! Provides the HTTP transport behind every API verb.
//!
//! # Features
//!
//! - **Base URL joining**: verbs pass paths relative to `/v1`
//! - **Authentication**: API key applied as basic auth
//! - **Throttling**: token bucket shared by all requests of a client
//! - **One attempt per request**: failures surface to the caller

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, DEFAULT_BASE_URL};
pub use rate_limit::Throttle;
