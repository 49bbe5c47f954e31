//! Log entry structure

use super::error_info::ErrorInfo;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A fully enriched record produced for a single log call
///
/// Properties live in two scopes. `entry_properties` hold call-specific
/// data and win over `context_properties` (process and ambient data) when
/// the two are merged. The same key may legitimately appear in both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<ErrorInfo>,
    pub username: Option<String>,
    pub entry_properties: BTreeMap<String, String>,
    pub context_properties: BTreeMap<String, String>,
}

impl LogEntry {
    /// An entry with no properties, stamped now
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            exception: None,
            username: None,
            entry_properties: BTreeMap::new(),
            context_properties: BTreeMap::new(),
        }
    }

    pub fn with_exception(mut self, exception: ErrorInfo) -> Self {
        self.exception = Some(exception);
        self
    }

    /// Look up a property with entry-over-context precedence
    pub fn property(&self, key: &str) -> Option<&str> {
        self.entry_properties
            .get(key)
            .or_else(|| self.context_properties.get(key))
            .map(String::as_str)
    }

    /// Context properties overlaid with entry properties
    pub fn merged_properties(&self) -> BTreeMap<String, String> {
        let mut merged = self.context_properties.clone();
        merged.extend(
            self.entry_properties
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        merged
    }
}
