//! CLI module
//!
//! Command-line interface over the API verbs.
//!
//! # Commands
//!
//! - `products` - List products
//! - `product` - Show one product with its tariffs
//! - `rates` - List tariff unit rates or standing charges
//! - `consumption` - List metered consumption
//! - `meter-point` - Show meter point details
//! - `gsp` - Map a postcode to its region

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, PagingArgs};
pub use runner::Runner;
