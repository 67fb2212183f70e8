//! Common types used throughout octo-api

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Ordered query parameters, sent in insertion order
pub type QueryParams = Vec<(String, String)>;
