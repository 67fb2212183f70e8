//! CLI commands and argument parsing

use crate::models::{parse_iso_zulu, Fuel, GroupBy, RateType, Timestamp};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Query the Octopus Energy REST API
#[derive(Parser, Debug)]
#[command(name = "octo-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Account API key (overrides the settings file and OCTOPUS_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List products
    Products {
        #[arg(long)]
        variable: Option<bool>,

        #[arg(long)]
        green: Option<bool>,

        #[arg(long)]
        tracker: Option<bool>,

        #[arg(long)]
        prepay: Option<bool>,

        #[arg(long)]
        business: Option<bool>,

        /// Products available at this time (ISO 8601)
        #[arg(long, value_parser = parse_timestamp)]
        available_at: Option<Timestamp>,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Show one product with its tariffs
    Product {
        code: String,

        /// Tariffs active at this time (ISO 8601)
        #[arg(long, value_parser = parse_timestamp)]
        active_at: Option<Timestamp>,
    },

    /// List unit rates or standing charges of a tariff
    Rates {
        product: String,

        tariff: String,

        #[arg(long, default_value = "electricity")]
        fuel: Fuel,

        #[arg(long, default_value = "standard-unit-rates")]
        rate_type: RateType,

        #[arg(long, value_parser = parse_timestamp)]
        from: Option<Timestamp>,

        #[arg(long, value_parser = parse_timestamp)]
        to: Option<Timestamp>,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// List metered consumption
    Consumption {
        /// MPAN (electricity) or MPRN (gas)
        meter_point: String,

        serial_number: String,

        #[arg(long, default_value = "electricity")]
        fuel: Fuel,

        #[arg(long, value_parser = parse_timestamp)]
        from: Option<Timestamp>,

        #[arg(long, value_parser = parse_timestamp)]
        to: Option<Timestamp>,

        /// Aggregate readings: hour, day, week, month or quarter
        #[arg(long)]
        group_by: Option<GroupBy>,

        /// Oldest readings first
        #[arg(long)]
        reverse: bool,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Show electricity meter point details
    MeterPoint { mpan: String },

    /// Map a postcode to its grid supply point region
    Gsp { postcode: String },
}

/// Paging options shared by listing commands
#[derive(clap::Args, Debug, Clone, Copy, Default)]
pub struct PagingArgs {
    /// Records per request (defaults to the settings page size)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Stop after this many records
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Indented JSON
    Pretty,
}

fn parse_timestamp(value: &str) -> Result<Timestamp, String> {
    parse_iso_zulu(value).map_err(|e| e.to_string())
}
