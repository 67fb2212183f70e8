//! Closed value sets used by the API
//!
//! Each enum is parsed from, and renders back to, the literal the API uses
//! on the wire.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Region
// ============================================================================

/// Electricity supply region (Grid Supply Point group)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    /// Eastern Electricity
    #[serde(rename = "_A")]
    Eastern,
    /// East Midlands Electricity
    #[serde(rename = "_B")]
    EastMidlands,
    /// London Electricity
    #[serde(rename = "_C")]
    London,
    /// Merseyside and North Wales Electricity Board
    #[serde(rename = "_D")]
    MerseysideAndNorthWales,
    /// Midlands Electricity
    #[serde(rename = "_E")]
    Midlands,
    /// North Eastern Electricity Board
    #[serde(rename = "_F")]
    NorthEastern,
    /// North Western Electricity Board
    #[serde(rename = "_G")]
    NorthWestern,
    /// Southern Electric
    #[serde(rename = "_H")]
    Southern,
    /// South Eastern Electricity Board
    #[serde(rename = "_J")]
    SouthEastern,
    /// South Wales Electricity
    #[serde(rename = "_K")]
    SouthWales,
    /// South Western Electricity
    #[serde(rename = "_L")]
    SouthWestern,
    /// Yorkshire Electricity
    #[serde(rename = "_M")]
    Yorkshire,
    /// South of Scotland Electricity Board
    #[serde(rename = "_N")]
    SouthScotland,
    /// North of Scotland Hydro Board
    #[serde(rename = "_P")]
    NorthScotland,
}

impl Region {
    /// Every region, in GSP letter order
    pub const ALL: [Region; 14] = [
        Region::Eastern,
        Region::EastMidlands,
        Region::London,
        Region::MerseysideAndNorthWales,
        Region::Midlands,
        Region::NorthEastern,
        Region::NorthWestern,
        Region::Southern,
        Region::SouthEastern,
        Region::SouthWales,
        Region::SouthWestern,
        Region::Yorkshire,
        Region::SouthScotland,
        Region::NorthScotland,
    ];

    /// The GSP group identifier, e.g. `_C`
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Eastern => "_A",
            Region::EastMidlands => "_B",
            Region::London => "_C",
            Region::MerseysideAndNorthWales => "_D",
            Region::Midlands => "_E",
            Region::NorthEastern => "_F",
            Region::NorthWestern => "_G",
            Region::Southern => "_H",
            Region::SouthEastern => "_J",
            Region::SouthWales => "_K",
            Region::SouthWestern => "_L",
            Region::Yorkshire => "_M",
            Region::SouthScotland => "_N",
            Region::NorthScotland => "_P",
        }
    }

    /// Name of the distribution network area
    pub fn description(&self) -> &'static str {
        match self {
            Region::Eastern => "Eastern Electricity",
            Region::EastMidlands => "East Midlands Electricity",
            Region::London => "London Electricity",
            Region::MerseysideAndNorthWales => "Merseyside and North Wales Electricity Board",
            Region::Midlands => "Midlands Electricity",
            Region::NorthEastern => "North Eastern Electricity Board",
            Region::NorthWestern => "North Western Electricity Board",
            Region::Southern => "Southern Electric",
            Region::SouthEastern => "South Eastern Electricity Board",
            Region::SouthWales => "South Wales Electricity",
            Region::SouthWestern => "South Western Electricity",
            Region::Yorkshire => "Yorkshire Electricity",
            Region::SouthScotland => "South of Scotland Electricity Board",
            Region::NorthScotland => "North of Scotland Hydro Board",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = Error;

    /// Accepts `_C`, `C` or `c`
    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().trim_start_matches('_').to_ascii_uppercase();
        Region::ALL
            .into_iter()
            .find(|r| r.as_str()[1..] == code)
            .ok_or_else(|| Error::invalid_input(format!("'{s}' is not a valid region")))
    }
}

// ============================================================================
// Rate Type
// ============================================================================

/// Kind of charge published for a tariff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RateType {
    StandingCharges,
    StandardUnitRates,
    DayUnitRates,
    NightUnitRates,
}

impl RateType {
    /// The URL path segment, e.g. `standard-unit-rates`
    pub fn as_str(&self) -> &'static str {
        match self {
            RateType::StandingCharges => "standing-charges",
            RateType::StandardUnitRates => "standard-unit-rates",
            RateType::DayUnitRates => "day-unit-rates",
            RateType::NightUnitRates => "night-unit-rates",
        }
    }

    /// Day/night rates only exist for dual register (Economy 7) meters
    pub fn is_dual_register(&self) -> bool {
        matches!(self, RateType::DayUnitRates | RateType::NightUnitRates)
    }
}

impl fmt::Display for RateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RateType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "standing-charges" => Ok(RateType::StandingCharges),
            "standard-unit-rates" => Ok(RateType::StandardUnitRates),
            "day-unit-rates" => Ok(RateType::DayUnitRates),
            "night-unit-rates" => Ok(RateType::NightUnitRates),
            other => Err(Error::invalid_input(format!(
                "'{other}' is not a valid rate type"
            ))),
        }
    }
}

// ============================================================================
// Fuel
// ============================================================================

/// Energy supply type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fuel {
    #[default]
    Electricity,
    Gas,
}

impl Fuel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Fuel::Electricity => "electricity",
            Fuel::Gas => "gas",
        }
    }
}

impl fmt::Display for Fuel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Fuel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "electricity" => Ok(Fuel::Electricity),
            "gas" => Ok(Fuel::Gas),
            other => Err(Error::invalid_input(format!("'{other}' is not a valid fuel"))),
        }
    }
}

// ============================================================================
// Group By
// ============================================================================

/// Aggregation period for consumption readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Hour,
    Day,
    Week,
    Month,
    Quarter,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Hour => "hour",
            GroupBy::Day => "day",
            GroupBy::Week => "week",
            GroupBy::Month => "month",
            GroupBy::Quarter => "quarter",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hour" => Ok(GroupBy::Hour),
            "day" => Ok(GroupBy::Day),
            "week" => Ok(GroupBy::Week),
            "month" => Ok(GroupBy::Month),
            "quarter" => Ok(GroupBy::Quarter),
            other => Err(Error::invalid_input(format!(
                "'{other}' is not a valid grouping"
            ))),
        }
    }
}
