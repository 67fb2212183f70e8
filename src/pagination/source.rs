//! HTTP-backed page source

use super::types::{Page, PageSource};
use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{JsonValue, QueryParams};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Pages of one API endpoint with a fixed set of query parameters.
///
/// Every request carries the fixed parameters followed by `page` and
/// `page_size`.
#[derive(Debug, Clone)]
pub struct EndpointSource {
    client: Arc<HttpClient>,
    path: String,
    params: QueryParams,
}

impl EndpointSource {
    pub fn new(client: Arc<HttpClient>, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            params: QueryParams::new(),
        }
    }

    /// Replace the fixed query parameters
    #[must_use]
    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    /// Add one fixed query parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }
}

#[async_trait]
impl PageSource for EndpointSource {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Page> {
        let mut query = self.params.clone();
        query.push(("page".to_string(), page.to_string()));
        query.push(("page_size".to_string(), page_size.to_string()));

        let body: JsonValue = self.client.get_json(&self.path, &query).await?;
        let page = Page::from_json(body)?;

        debug!(
            path = %self.path,
            count = page.count,
            results = page.results.len(),
            has_next = page.has_next(),
            "Received page"
        );
        Ok(page)
    }

    fn describe(&self) -> String {
        self.path.clone()
    }
}
