//! API verbs mapped onto endpoint paths

use super::params::{ConsumptionQuery, ProductQuery, RateQuery};
use crate::auth::AuthConfig;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::models::{
    format_iso, Consumption, DetailedProduct, FromRecord, Fuel, MeterPointDetails, Product,
    RateInfo, RateType, Region, Timestamp,
};
use crate::pagination::{EndpointSource, Page, PaginatedSequence};
use crate::types::{JsonValue, QueryParams};
use std::sync::Arc;
use tracing::debug;

/// Page size used when a query does not set one
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Largest page the products endpoint accepts
pub const MAX_PRODUCT_PAGE_SIZE: u32 = 1_500;

/// Largest page the tariff charge endpoints accept
pub const MAX_TARIFF_PAGE_SIZE: u32 = 1_500;

/// Largest page the consumption endpoints accept
pub const MAX_CONSUMPTION_PAGE_SIZE: u32 = 25_000;

/// Client for the Octopus Energy REST API.
///
/// Listing verbs return a [`PaginatedSequence`] without making a request;
/// lookups of single resources are `async` and fetch immediately.
#[derive(Debug, Clone)]
pub struct OctoApi {
    client: Arc<HttpClient>,
    default_page_size: u32,
}

impl OctoApi {
    /// Client for the public API authenticated with an account API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = HttpClient::with_auth(HttpClientConfig::default(), AuthConfig::api_key(api_key))?;
        Ok(Self::with_client(client))
    }

    /// Client over a preconfigured HTTP client
    pub fn with_client(client: HttpClient) -> Self {
        Self {
            client: Arc::new(client),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Client built from loaded settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let client = HttpClient::with_auth(settings.http_config(), settings.auth_config())?;
        Ok(Self::with_client(client).with_default_page_size(settings.page_size))
    }

    /// Page size used when a query leaves it unset
    #[must_use]
    pub fn with_default_page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = page_size;
        self
    }

    pub fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    // ========================================================================
    // Products
    // ========================================================================

    /// List products, optionally filtered
    pub fn get_products(&self, query: &ProductQuery) -> Result<PaginatedSequence<Product>> {
        self.sequence(
            "/products/",
            query.to_params(),
            query.page_size,
            MAX_PRODUCT_PAGE_SIZE,
        )
    }

    /// Retrieve a product with its tariffs.
    ///
    /// `tariffs_active_at` selects which tariffs are returned (server
    /// default: now).
    pub async fn get_product_info(
        &self,
        product_code: &str,
        tariffs_active_at: Option<Timestamp>,
    ) -> Result<DetailedProduct> {
        let path = format!("/products/{}/", path_segment("product_code", product_code)?);

        let mut query = QueryParams::new();
        if let Some(at) = tariffs_active_at {
            query.push(("tariffs_active_at".to_string(), format_iso(&at)));
        }

        let body: JsonValue = self.client.get_json(&path, &query).await?;
        DetailedProduct::from_record(&body)
    }

    /// Unit rates or standing charges of a tariff, newest first
    pub fn get_tariff_charges(
        &self,
        product_code: &str,
        tariff_code: &str,
        fuel: Fuel,
        rate_type: RateType,
        query: &RateQuery,
    ) -> Result<PaginatedSequence<RateInfo>> {
        if fuel == Fuel::Gas && rate_type.is_dual_register() {
            return Err(Error::invalid_input(format!(
                "gas tariffs have no {rate_type}"
            )));
        }

        let path = format!(
            "/products/{}/{}-tariffs/{}/{}/",
            path_segment("product_code", product_code)?,
            fuel,
            path_segment("tariff_code", tariff_code)?,
            rate_type
        );
        self.sequence(&path, query.to_params(), query.page_size, MAX_TARIFF_PAGE_SIZE)
    }

    // ========================================================================
    // Meter points and industry data
    // ========================================================================

    /// Region and profile class of an electricity meter point
    pub async fn get_meter_point_details(&self, mpan: &str) -> Result<MeterPointDetails> {
        let path = format!("/electricity-meter-points/{}/", path_segment("mpan", mpan)?);
        let body: JsonValue = self.client.get_json(&path, &[]).await?;
        MeterPointDetails::from_record(&body)
    }

    /// Grid supply point region of a postcode
    pub async fn get_grid_supply_point(&self, postcode: &str) -> Result<Region> {
        let query = [("postcode".to_string(), postcode.trim().to_string())];
        let body: JsonValue = self
            .client
            .get_json("/industry/grid-supply-points/", &query)
            .await?;
        let page = Page::from_json(body)?;

        let first = page.results.first().ok_or_else(|| Error::PostcodeNotMapped {
            postcode: postcode.to_string(),
        })?;
        let group_id = first
            .get("group_id")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| Error::record_format("grid supply point", "missing field `group_id`"))?;

        debug!(postcode, group_id, "Mapped postcode");
        group_id
            .parse()
            .map_err(|e: Error| Error::record_format("grid supply point", e.to_string()))
    }

    // ========================================================================
    // Consumption
    // ========================================================================

    /// Half-hourly (or grouped) consumption of a meter.
    ///
    /// `meter_point` is the MPAN for electricity or the MPRN for gas.
    pub fn get_consumption(
        &self,
        meter_point: &str,
        serial_number: &str,
        fuel: Fuel,
        query: &ConsumptionQuery,
    ) -> Result<PaginatedSequence<Consumption>> {
        let path = format!(
            "/{}-meter-points/{}/meters/{}/consumption/",
            fuel,
            path_segment("meter_point", meter_point)?,
            path_segment("serial_number", serial_number)?
        );
        self.sequence(
            &path,
            query.to_params(),
            query.page_size,
            MAX_CONSUMPTION_PAGE_SIZE,
        )
    }

    fn sequence<T: FromRecord + 'static>(
        &self,
        path: &str,
        params: QueryParams,
        page_size: Option<u32>,
        max_page_size: u32,
    ) -> Result<PaginatedSequence<T>> {
        let source = EndpointSource::new(Arc::clone(&self.client), path).with_params(params);
        PaginatedSequence::for_records(
            source,
            page_size.unwrap_or(self.default_page_size),
            max_page_size,
        )
    }
}

/// Reject values that would change the shape of a URL path
fn path_segment<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::invalid_input(format!("{name} cannot be empty")));
    }
    if value.contains(['/', '?', '#']) {
        return Err(Error::invalid_input(format!(
            "{name} '{value}' contains reserved characters"
        )));
    }
    Ok(value)
}
