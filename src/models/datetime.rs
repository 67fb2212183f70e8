//! Timestamp parsing and the fixed offsets the API reports in
//!
//! The API writes UTC as a trailing `Z` (`2017-01-11T10:00:00Z`) and local
//! UK times with an explicit offset (`2020-10-03T00:00:00+01:00`). Offsets
//! are preserved; comparisons between timestamps are by instant.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};

/// A timestamp as delivered by the API, offset preserved
pub type Timestamp = DateTime<FixedOffset>;

const BST_OFFSET_SECONDS: i32 = 3600;

/// British Summer Time (UTC+1)
pub fn bst() -> FixedOffset {
    FixedOffset::east_opt(BST_OFFSET_SECONDS).unwrap_or_else(gmt)
}

/// Greenwich Mean Time (UTC+0)
pub fn gmt() -> FixedOffset {
    Utc.fix()
}

/// Alias of [`gmt`]
pub fn utc() -> FixedOffset {
    gmt()
}

/// Parse an ISO 8601 timestamp where `Z` means UTC.
///
/// Values without an offset are taken to be UTC, and bare dates to be
/// midnight UTC.
pub fn parse_iso_zulu(value: &str) -> Result<Timestamp> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed);
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().fixed_offset());
        }
    }

    Err(Error::invalid_input(format!(
        "'{value}' is not an ISO 8601 timestamp"
    )))
}

/// Render a timestamp the way the API accepts it in query strings
pub fn format_iso(timestamp: &Timestamp) -> String {
    timestamp.to_rfc3339()
}
