//! Serializable logger configuration

use super::{
    error::{LoggerError, Result},
    log_level::{LevelSet, LogLevel},
    timestamp::TimestampFormat,
};
use serde::{Deserialize, Serialize};

/// Settings that can be loaded from a file and applied with
/// [`LoggerBuilder::config`](crate::LoggerBuilder::config)
///
/// Missing fields take their defaults.
///
/// ```
/// use rust_structured_logger::{LoggerConfig, LogLevel};
///
/// let config = LoggerConfig::from_json(r#"{
///     "name": "orders",
///     "levels_handled": ["Info", "Warn", "Error", "Fatal"]
/// }"#).unwrap();
///
/// assert_eq!(config.name, "orders");
/// assert!(!config.level_set().contains(LogLevel::Debug));
/// assert!(config.use_exception_handling);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub name: String,
    pub levels_handled: Vec<LogLevel>,
    pub use_exception_handling: bool,
    pub timestamp_format: TimestampFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: "Logger".to_string(),
            levels_handled: LogLevel::ALL.to_vec(),
            use_exception_handling: true,
            timestamp_format: TimestampFormat::default(),
        }
    }
}

impl LoggerConfig {
    /// Parse and validate a JSON document
    pub fn from_json(text: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn level_set(&self) -> LevelSet {
        self.levels_handled.iter().copied().collect()
    }

    /// Check that the settings are usable
    ///
    /// An empty level list is valid (the logger writes nothing). A custom
    /// timestamp pattern must read back what it writes.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::config("LoggerConfig", "name must not be empty"));
        }

        self.timestamp_format.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let config = LoggerConfig::from_json("{}").unwrap();
        assert_eq!(config, LoggerConfig::default());
        assert_eq!(config.level_set(), LevelSet::all());
    }

    #[test]
    fn test_empty_levels_are_valid() {
        let config = LoggerConfig::from_json(r#"{"levels_handled": []}"#).unwrap();
        assert!(config.level_set().is_empty());
    }

    #[test]
    fn test_unparseable_custom_format_rejected() {
        let config = LoggerConfig {
            timestamp_format: TimestampFormat::Custom("%H:%M".to_string()),
            ..LoggerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_invalid_custom_specifier_rejected() {
        let result = std::panic::catch_unwind(|| {
            LoggerConfig::from_json(r#"{"timestamp_format":{"Custom":"%Q"}}"#)
        })
        .expect("validation must not panic");
        assert!(matches!(result, Err(LoggerError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            LoggerConfig::from_json("{ not json"),
            Err(LoggerError::JsonError(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = LoggerConfig {
            name: "svc".to_string(),
            levels_handled: vec![LogLevel::Error, LogLevel::Fatal],
            use_exception_handling: false,
            timestamp_format: TimestampFormat::UnixMillis,
        };
        let text = config.to_json().unwrap();
        assert_eq!(LoggerConfig::from_json(&text).unwrap(), config);
    }
}
