//! Products, tariffs and rates

use super::convert::{
    iso_zulu, lenient_f64, lenient_i64, lenient_string, optional_f64, optional_iso_zulu,
    optional_u32, truthy_bool,
};
use super::datetime::Timestamp;
use super::{decode_record, FromRecord};
use crate::error::Result;
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A hypermedia link attached to a product or tariff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(default)]
    pub rel: String,
    #[serde(default = "default_link_method")]
    pub method: String,
}

fn default_link_method() -> String {
    "GET".to_string()
}

/// Fields shared by every product representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseProduct {
    /// The date from which the product is available.
    #[serde(default, deserialize_with = "optional_iso_zulu")]
    pub available_from: Option<Timestamp>,

    /// The date until which the product is available.
    #[serde(default, deserialize_with = "optional_iso_zulu")]
    pub available_to: Option<Timestamp>,

    #[serde(deserialize_with = "lenient_string")]
    pub brand: String,

    #[serde(deserialize_with = "lenient_string")]
    pub code: String,

    #[serde(deserialize_with = "lenient_string")]
    pub description: String,

    #[serde(deserialize_with = "lenient_string")]
    pub display_name: String,

    #[serde(deserialize_with = "lenient_string")]
    pub full_name: String,

    #[serde(deserialize_with = "truthy_bool")]
    pub is_business: bool,

    #[serde(deserialize_with = "truthy_bool")]
    pub is_green: bool,

    #[serde(deserialize_with = "truthy_bool")]
    pub is_prepay: bool,

    #[serde(deserialize_with = "truthy_bool")]
    pub is_restricted: bool,

    /// Whether the product tracks the wholesale electricity rate.
    #[serde(deserialize_with = "truthy_bool")]
    pub is_tracker: bool,

    #[serde(deserialize_with = "truthy_bool")]
    pub is_variable: bool,

    pub links: Vec<Link>,

    /// Length in months for fixed-term products.
    #[serde(default, deserialize_with = "optional_u32")]
    pub term: Option<u32>,
}

/// A product as listed by the products endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(flatten)]
    pub base: BaseProduct,

    /// `IMPORT` (supply to the customer) or `EXPORT` (supply to the grid).
    #[serde(deserialize_with = "lenient_string")]
    pub direction: String,
}

impl FromRecord for Product {
    const KIND: &'static str = "product";

    fn from_record(raw: &JsonValue) -> Result<Self> {
        decode_record(Self::KIND, raw)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.base.code, self.base.display_name, self.direction
        )
    }
}

/// A single product with its per-region tariffs.
///
/// * `standard_unit_rate_*` values are in p/kWh.
/// * `standing_charge_*` values are in p/day.
/// * `annual_cost_*` values in the sample quotes are in p.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedProduct {
    #[serde(flatten)]
    pub base: BaseProduct,

    #[serde(default, deserialize_with = "optional_iso_zulu")]
    pub tariffs_active_at: Option<Timestamp>,

    #[serde(default)]
    pub single_register_electricity_tariffs: RegionalTariffs,

    #[serde(default)]
    pub dual_register_electricity_tariffs: RegionalTariffs,

    #[serde(default)]
    pub single_register_gas_tariffs: RegionalTariffs,

    #[serde(default)]
    pub sample_quotes: JsonValue,

    #[serde(default)]
    pub sample_consumption: JsonValue,
}

impl FromRecord for DetailedProduct {
    const KIND: &'static str = "detailed product";

    fn from_record(raw: &JsonValue) -> Result<Self> {
        decode_record(Self::KIND, raw)
    }
}

/// The charges of one tariff under one payment method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tariff {
    #[serde(deserialize_with = "lenient_string")]
    pub code: String,

    /// In p/day
    #[serde(deserialize_with = "lenient_f64")]
    pub standing_charge_exc_vat: f64,

    /// In p/day
    #[serde(deserialize_with = "lenient_f64")]
    pub standing_charge_inc_vat: f64,

    #[serde(deserialize_with = "lenient_i64")]
    pub online_discount_exc_vat: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub online_discount_inc_vat: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub dual_fuel_discount_exc_vat: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub dual_fuel_discount_inc_vat: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub exit_fees_exc_vat: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub exit_fees_inc_vat: i64,

    pub links: Vec<Link>,

    /// In p/kWh
    #[serde(default, deserialize_with = "optional_f64")]
    pub standard_unit_rate_exc_vat: Option<f64>,
    /// In p/kWh
    #[serde(default, deserialize_with = "optional_f64")]
    pub standard_unit_rate_inc_vat: Option<f64>,
    /// In p/kWh
    #[serde(default, deserialize_with = "optional_f64")]
    pub day_unit_rate_exc_vat: Option<f64>,
    /// In p/kWh
    #[serde(default, deserialize_with = "optional_f64")]
    pub day_unit_rate_inc_vat: Option<f64>,
    /// In p/kWh
    #[serde(default, deserialize_with = "optional_f64")]
    pub night_unit_rate_exc_vat: Option<f64>,
    /// In p/kWh
    #[serde(default, deserialize_with = "optional_f64")]
    pub night_unit_rate_inc_vat: Option<f64>,
}

/// Tariffs keyed by GSP region, then by payment method (e.g. `direct_debit_monthly`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionalTariffs(pub BTreeMap<String, BTreeMap<String, Tariff>>);

impl RegionalTariffs {
    /// Tariffs for one region, keyed by payment method
    pub fn region(&self, gsp: &str) -> Option<&BTreeMap<String, Tariff>> {
        self.0.get(gsp)
    }

    /// The tariff for a region and payment method
    pub fn get(&self, gsp: &str, payment_method: &str) -> Option<&Tariff> {
        self.0.get(gsp)?.get(payment_method)
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RegionalTariffs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let regions: Vec<&str> = self.regions().collect();
        write!(f, "RegionalTariffs([{}])", regions.join(", "))
    }
}

/// The unit rate or standing charge of a tariff over a period of time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateInfo {
    /// In p/kWh (p/day for standing charges)
    #[serde(deserialize_with = "lenient_f64")]
    pub value_exc_vat: f64,

    /// In p/kWh (p/day for standing charges)
    #[serde(deserialize_with = "lenient_f64")]
    pub value_inc_vat: f64,

    #[serde(deserialize_with = "iso_zulu")]
    pub valid_from: Timestamp,

    /// `None` if the rate continues in perpetuity.
    #[serde(default, deserialize_with = "optional_iso_zulu")]
    pub valid_to: Option<Timestamp>,
}

impl FromRecord for RateInfo {
    const KIND: &'static str = "rate";

    fn from_record(raw: &JsonValue) -> Result<Self> {
        decode_record(Self::KIND, raw)
    }
}

impl fmt::Display for RateInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.4}p ({:.4}p inc VAT) from {}",
            self.value_exc_vat,
            self.value_inc_vat,
            self.valid_from.to_rfc3339()
        )?;
        match &self.valid_to {
            Some(to) => write!(f, " to {}", to.to_rfc3339()),
            None => f.write_str(" onwards"),
        }
    }
}
