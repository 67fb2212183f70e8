//! Authentication module
//!
//! Supports: API Key (as HTTP basic username), None
//!
//! The Octopus Energy API authenticates with HTTP basic auth where the API
//! key is the username and the password is empty. Public endpoints
//! (products, tariff charges, grid supply points) need no credentials.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;
