pub mod config;
pub mod conflicts;
pub mod next_run;
pub mod plan;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use std::path::Path;

use blockplan_core::error::Result;
use blockplan_core::{CoreError, ValidationError};

pub type CmdResult = Result<()>;

/// Read and parse a JSON input file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| CoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse an RFC 3339 instant, defaulting to the current time.
pub fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)
            .map_err(|e| ValidationError::invalid("now", format!("'{s}': {e}")))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

/// Parse a YYYY-MM-DD date, defaulting to the UTC date of `now`.
pub fn parse_day(day: Option<&str>, now: DateTime<Utc>) -> Result<NaiveDate> {
    match day {
        Some(s) => Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
            ValidationError::invalid("date", format!("'{s}' (expected YYYY-MM-DD): {e}"))
        })?),
        None => Ok(now.date_naive()),
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
