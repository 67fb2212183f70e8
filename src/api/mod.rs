//! API verb layer
//!
//! Maps each verb onto its endpoint, supplies the endpoint's page size
//! ceiling and fixed query parameters, and hands paginated results back as
//! [`PaginatedSequence`](crate::pagination::PaginatedSequence)s.

mod client;
mod params;

pub use client::{
    OctoApi, DEFAULT_PAGE_SIZE, MAX_CONSUMPTION_PAGE_SIZE, MAX_PRODUCT_PAGE_SIZE,
    MAX_TARIFF_PAGE_SIZE,
};
pub use params::{ConsumptionQuery, ProductQuery, RateQuery};

#[cfg(test)]
mod tests;
