//! Epoch-millisecond datetime rendering for the `datetime` backend

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;

use crate::value::Value;

/// Zone in which datetime values are rendered
///
/// Configured per call through [`FormatConfig`](super::FormatConfig); the
/// host machine's local zone is never consulted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Timezone {
    /// Coordinated universal time
    #[default]
    Utc,
    /// A fixed offset from UTC, e.g. +01:00
    Fixed(FixedOffset),
    /// An IANA zone with DST rules, e.g. Europe/Brussels
    Named(Tz),
}

/// Pattern used when a datetime placeholder has no format spec
const DEFAULT_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// Render an epoch-millisecond value with a strftime pattern
pub fn format(value: &Value, spec: Option<&str>, timezone: &Timezone) -> Result<String, String> {
    let Some(millis) = value.as_epoch_millis() else {
        return Err(format!(
            "datetime formatter expects epoch milliseconds, got {}",
            value.type_name()
        ));
    };

    let Some(utc) = DateTime::<Utc>::from_timestamp_millis(millis) else {
        return Err(format!("timestamp {}ms is out of range", millis));
    };

    let pattern = spec.unwrap_or(DEFAULT_PATTERN);
    let mut out = String::new();
    // chrono reports bad patterns through fmt::Error when the formatter
    // is driven, not when it is built
    let result = match timezone {
        Timezone::Utc => write!(out, "{}", utc.format(pattern)),
        Timezone::Fixed(offset) => write!(out, "{}", utc.with_timezone(offset).format(pattern)),
        Timezone::Named(tz) => write!(out, "{}", utc.with_timezone(tz).format(pattern)),
    };
    result.map_err(|_| format!("invalid datetime pattern '{}'", pattern))?;

    Ok(out)
}
