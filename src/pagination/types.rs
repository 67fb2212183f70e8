//! Pagination types and traits
//!
//! Defines the page envelope and the two collaborators a
//! [`PaginatedSequence`](super::PaginatedSequence) is built from.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One server response unit of a paginated endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    /// Total number of records across all pages
    pub count: usize,

    /// Continuation marker, empty or missing on the final page
    #[serde(default)]
    pub next: Option<String>,

    #[serde(default)]
    pub previous: Option<String>,

    /// Raw records in delivery order
    pub results: Vec<JsonValue>,
}

impl Page {
    /// Create a final page
    pub fn new(count: usize, results: Vec<JsonValue>) -> Self {
        Self {
            count,
            next: None,
            previous: None,
            results,
        }
    }

    /// Set the continuation marker
    #[must_use]
    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next = Some(next.into());
        self
    }

    #[must_use]
    pub fn with_previous(mut self, previous: impl Into<String>) -> Self {
        self.previous = Some(previous.into());
        self
    }

    /// Whether the server reported a further page
    pub fn has_next(&self) -> bool {
        self.next.as_deref().is_some_and(|next| !next.trim().is_empty())
    }

    /// Decode a page envelope from a response body
    pub fn from_json(body: JsonValue) -> Result<Self> {
        serde_json::from_value(body)
            .map_err(|e| Error::decode(format!("invalid page envelope: {e}")))
    }
}

/// Fetches numbered pages of raw records.
///
/// Pages are numbered from 1. Any fixed query parameters (filters, ordering,
/// grouping) are bound into the source when it is created and sent
/// unchanged with every page.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch one page
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Page>;

    /// Short description used in log events
    fn describe(&self) -> String {
        "page source".to_string()
    }
}

/// Builds a typed record from one raw result object
pub type RecordFactory<T> = Box<dyn Fn(&JsonValue) -> Result<T> + Send + Sync>;
