//! Auth configuration types

use std::fmt;

/// Authentication configuration
#[derive(Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// Account API key, sent as the basic auth username with an empty password
    ApiKey {
        /// The API key value
        key: String,
    },
}

impl AuthConfig {
    /// Create an API key config
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey { key: key.into() }
    }

    /// Whether any credentials will be sent
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::None)
    }
}

// Credentials never reach logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::ApiKey { .. } => f.debug_struct("ApiKey").field("key", &"***").finish(),
        }
    }
}
