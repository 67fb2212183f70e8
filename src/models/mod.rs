//! Typed records returned by the API
//!
//! Every record kind validates and normalizes its own fields when it is
//! built from raw JSON (see [`FromRecord`]); a malformed record fails with
//! [`Error::RecordFormat`](crate::Error::RecordFormat) instead of producing
//! a partially filled value.

mod consumption;
mod convert;
pub mod datetime;
mod enums;
mod meter_point;
mod product;

pub use consumption::Consumption;
pub use datetime::{bst, format_iso, gmt, parse_iso_zulu, utc, Timestamp};
pub use enums::{Fuel, GroupBy, RateType, Region};
pub use meter_point::MeterPointDetails;
pub use product::{BaseProduct, DetailedProduct, Link, Product, RateInfo, RegionalTariffs, Tariff};

use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::de::DeserializeOwned;

/// Construction of a typed record from one raw JSON result object
pub trait FromRecord: Sized {
    /// Human readable record kind, used in error messages
    const KIND: &'static str;

    /// Build the record, failing if required fields are missing or malformed
    fn from_record(raw: &JsonValue) -> Result<Self>;
}

/// Deserialize `raw` into `T`, reporting failures as record format errors
pub(crate) fn decode_record<T: DeserializeOwned>(kind: &'static str, raw: &JsonValue) -> Result<T> {
    T::deserialize(raw).map_err(|e| Error::record_format(kind, e.to_string()))
}
