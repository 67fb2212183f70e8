// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # octo-api
//!
//! A typed client for the Octopus Energy REST API.
//!
//! ## Features
//!
//! - **Lazy pagination**: listing endpoints return a [`PaginatedSequence`]
//!   that fetches pages only when an index, slice or iteration step needs them
//! - **Typed records**: products, tariffs, rates, consumption and meter points
//!   validated when they are built
//! - **Page size ceilings**: checked per endpoint before any request is sent
//! - **Client-side throttling** in the HTTP transport, one attempt per request
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use octo_api::{ConsumptionQuery, Fuel, OctoApi, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let api = OctoApi::new("sk_live_...")?;
//!
//!     let mut readings = api.get_consumption(
//!         "2000024512368",
//!         "21L4381884",
//!         Fuel::Electricity,
//!         &ConsumptionQuery::default(),
//!     )?;
//!
//!     println!("{} readings", readings.len().await?);
//!     println!("latest: {}", readings.get(0).await?);
//!     println!("oldest: {}", readings.get(-1).await?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        OctoApi (verbs)                          │
//! │  get_products  get_tariff_charges  get_consumption  lookups     │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌───────────────┬──────────────┴──────────┬───────────────────────┐
//! │  Pagination   │        Models           │        HTTP           │
//! ├───────────────┼─────────────────────────┼───────────────────────┤
//! │ Sequence      │ Product / Tariff        │ Base URL + auth       │
//! │ PageSource    │ RateInfo / Consumption  │ Rate limit            │
//! │ RecordFactory │ Region / RateType       │ Status mapping        │
//! └───────────────┴─────────────────────────┴───────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication
pub mod auth;

/// HTTP client with throttling
pub mod http;

/// Lazily populated paginated sequences
pub mod pagination;

/// Typed API records
pub mod models;

/// API verbs
pub mod api;

/// Settings loading
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use api::{ConsumptionQuery, OctoApi, ProductQuery, RateQuery};
pub use config::Settings;
pub use models::{
    Consumption, DetailedProduct, FromRecord, Fuel, GroupBy, MeterPointDetails, Product, RateInfo,
    RateType, Region, Timestamp,
};
pub use pagination::{Page, PageSource, PaginatedSequence};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
