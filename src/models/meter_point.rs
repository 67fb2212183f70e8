//! Meter point details

use super::convert::{lenient_string, lenient_u8};
use super::enums::Region;
use super::{decode_record, FromRecord};
use crate::error::Result;
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Information about an electricity meter point.
///
/// Profile classes (from Elexon):
///
/// 1. Domestic Unrestricted
/// 2. Domestic Economy 7
/// 3. Non-Domestic Unrestricted
/// 4. Non-Domestic Economy 7
/// 5. Non-Domestic Maximum Demand, peak load factor below 20%
/// 6. Non-Domestic Maximum Demand, peak load factor 20-30%
/// 7. Non-Domestic Maximum Demand, peak load factor 30-40%
/// 8. Non-Domestic Maximum Demand, peak load factor over 40%
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterPointDetails {
    /// Meter point administration number
    #[serde(deserialize_with = "lenient_string")]
    pub mpan: String,

    /// Grid supply point the meter is located in
    pub gsp: Region,

    #[serde(deserialize_with = "lenient_u8")]
    pub profile_class: u8,
}

impl FromRecord for MeterPointDetails {
    const KIND: &'static str = "meter point";

    fn from_record(raw: &JsonValue) -> Result<Self> {
        decode_record(Self::KIND, raw)
    }
}

impl fmt::Display for MeterPointDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MPAN {} in {} ({}), profile class {}",
            self.mpan,
            self.gsp,
            self.gsp.description(),
            self.profile_class
        )
    }
}
