//! Timestamp formatting utilities
//!
//! Provides the formats used for the `timestamp` entry property. Every
//! format can parse back what it writes, so a stored timestamp can be
//! recovered by the same format that produced it.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Standardized timestamp format options
///
/// # Examples
///
/// ```
/// use rust_structured_logger::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Iso8601;
/// let text = format.format(&Utc::now());
/// let parsed = format.parse(&text).unwrap();
/// assert_eq!(format.format(&parsed), text);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    ///
    /// This is the default format, widely supported by log aggregation systems.
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T10:30:45.123456789+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format, interpreted as UTC when parsed
    ///
    /// The pattern must contain both date and time fields to be parseable.
    /// A pattern with an unknown specifier formats as [`TimestampFormat::Iso8601`].
    Custom(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => TimestampFormat::Iso8601.format(datetime),
                }
            }
        }
    }

    /// Parse text produced by [`TimestampFormat::format`]
    ///
    /// Returns `None` when the text does not match this format.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<DateTime<Utc>> {
        match self {
            TimestampFormat::Iso8601 | TimestampFormat::Iso8601Micros => {
                NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.fZ")
                    .ok()
                    .map(|naive| naive.and_utc())
            }
            TimestampFormat::Rfc3339 => DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            TimestampFormat::UnixMillis => text
                .parse::<i64>()
                .ok()
                .and_then(DateTime::from_timestamp_millis),
            TimestampFormat::Custom(format_str) => NaiveDateTime::parse_from_str(text, format_str)
                .ok()
                .map(|naive| naive.and_utc()),
        }
    }

    /// Check that a custom pattern is well formed and reads back what it writes
    ///
    /// The built-in formats always pass.
    pub fn validate(&self) -> Result<()> {
        let TimestampFormat::Custom(pattern) = self else {
            return Ok(());
        };

        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::config(
                "TimestampFormat",
                format!("custom pattern '{}' contains an invalid specifier", pattern),
            ));
        }

        let probe = Utc
            .with_ymd_and_hms(2024, 5, 17, 13, 45, 30)
            .single()
            .ok_or_else(|| LoggerError::other("invalid probe timestamp"))?;
        let rendered = self.format(&probe);
        if self.parse(&rendered).is_none() {
            return Err(LoggerError::config(
                "TimestampFormat",
                format!("custom pattern '{}' cannot be parsed back", pattern),
            ));
        }

        Ok(())
    }
}
