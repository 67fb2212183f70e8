//! Metered consumption readings

use super::convert::{iso_zulu, lenient_f64};
use super::datetime::Timestamp;
use super::{decode_record, FromRecord};
use crate::error::Result;
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Energy consumed over one interval.
///
/// Electricity is in kWh. Gas is in kWh for SMETS1 meters and m³ for SMETS2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consumption {
    #[serde(deserialize_with = "lenient_f64")]
    pub consumption: f64,

    #[serde(deserialize_with = "iso_zulu")]
    pub interval_start: Timestamp,

    #[serde(deserialize_with = "iso_zulu")]
    pub interval_end: Timestamp,
}

impl Consumption {
    pub fn new(consumption: f64, interval_start: Timestamp, interval_end: Timestamp) -> Self {
        Self {
            consumption,
            interval_start,
            interval_end,
        }
    }
}

impl FromRecord for Consumption {
    const KIND: &'static str = "consumption";

    fn from_record(raw: &JsonValue) -> Result<Self> {
        decode_record(Self::KIND, raw)
    }
}

impl fmt::Display for Consumption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {}",
            self.consumption,
            self.interval_start.to_rfc3339(),
            self.interval_end.to_rfc3339()
        )
    }
}
