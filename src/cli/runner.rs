//! CLI runner - executes commands

use crate::api::{ConsumptionQuery, OctoApi, ProductQuery, RateQuery};
use crate::cli::commands::{Cli, Commands, OutputFormat, PagingArgs};
use crate::config::Settings;
use crate::error::{Result, ResultExt};
use crate::pagination::PaginatedSequence;
use futures::StreamExt;
use serde::Serialize;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let api = OctoApi::from_settings(&self.settings()?)?;

        match &self.cli.command {
            Commands::Products {
                variable,
                green,
                tracker,
                prepay,
                business,
                available_at,
                paging,
            } => {
                let query = ProductQuery {
                    is_variable: *variable,
                    is_green: *green,
                    is_tracker: *tracker,
                    is_prepay: *prepay,
                    is_business: *business,
                    available_at: *available_at,
                    page_size: paging.page_size,
                };
                let mut products = api.get_products(&query)?;
                self.emit_sequence(&mut products, *paging).await
            }
            Commands::Product { code, active_at } => {
                let product = api.get_product_info(code, *active_at).await?;
                self.emit(&product)
            }
            Commands::Rates {
                product,
                tariff,
                fuel,
                rate_type,
                from,
                to,
                paging,
            } => {
                let query = RateQuery {
                    period_from: *from,
                    period_to: *to,
                    page_size: paging.page_size,
                };
                let mut rates = api.get_tariff_charges(product, tariff, *fuel, *rate_type, &query)?;
                self.emit_sequence(&mut rates, *paging).await
            }
            Commands::Consumption {
                meter_point,
                serial_number,
                fuel,
                from,
                to,
                group_by,
                reverse,
                paging,
            } => {
                let query = ConsumptionQuery {
                    period_from: *from,
                    period_to: *to,
                    page_size: paging.page_size,
                    reverse: *reverse,
                    group_by: *group_by,
                };
                let mut readings = api.get_consumption(meter_point, serial_number, *fuel, &query)?;
                self.emit_sequence(&mut readings, *paging).await
            }
            Commands::MeterPoint { mpan } => {
                let details = api.get_meter_point_details(mpan).await?;
                self.emit(&details)
            }
            Commands::Gsp { postcode } => {
                let region = api.get_grid_supply_point(postcode).await?;
                info!(postcode = %postcode, region = %region, "{}", region.description());
                self.emit(&region)
            }
        }
    }

    /// Resolve settings: file, then environment, then flags
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.cli.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default().apply_env(),
        };

        if let Some(key) = &self.cli.api_key {
            settings.api_key = Some(key.clone());
        }
        if let Some(url) = &self.cli.base_url {
            settings.base_url.clone_from(url);
        }

        settings.validate()?;
        debug!(?settings, "Resolved settings");
        Ok(settings)
    }

    /// Stream records out of a sequence, fetching pages only as needed
    async fn emit_sequence<T: Serialize + Clone>(
        &self,
        sequence: &mut PaginatedSequence<T>,
        paging: PagingArgs,
    ) -> Result<()> {
        let started = Instant::now();
        let total = sequence.len().await?;
        info!(total, page_size = sequence.page_size(), "Streaming records");

        let limit = paging.limit.unwrap_or(usize::MAX);
        let mut emitted = 0_usize;
        {
            let records = sequence.iter().take(limit);
            futures::pin_mut!(records);
            while let Some(record) = records.next().await {
                self.emit(&record?)?;
                emitted += 1;
            }
        }

        info!(
            emitted,
            total,
            pages = sequence.pages_fetched(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Done"
        );
        Ok(())
    }

    /// Write one value to stdout
    fn emit<T: Serialize>(&self, value: &T) -> Result<()> {
        let rendered = self.render(value)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{rendered}").context("Failed to write output")?;
        Ok(())
    }

    /// One JSON line, or indented multi-line JSON for `--format pretty`
    fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        Ok(match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        })
    }
}
