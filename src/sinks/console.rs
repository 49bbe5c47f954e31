//! Console sink implementation

use crate::core::{keys, LogEntry, LogLevel, Result, Sink, TimestampFormat};
use colored::Colorize;

/// Human-readable single-line output
///
/// Error and Fatal go to stderr, everything else to stdout.
pub struct ConsoleSink {
    use_colors: bool,
    timestamp_format: TimestampFormat,
    show_properties: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            timestamp_format: TimestampFormat::default(),
            show_properties: false,
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Set the timestamp format for this sink
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_structured_logger::sinks::ConsoleSink;
    /// use rust_structured_logger::TimestampFormat;
    ///
    /// let sink = ConsoleSink::new()
    ///     .with_timestamp_format(TimestampFormat::Iso8601Micros);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Append non-reserved entry properties as `key=value` pairs
    #[must_use]
    pub fn with_properties(mut self, show: bool) -> Self {
        self.show_properties = show;
        self
    }

    fn format_line(&self, entry: &LogEntry) -> String {
        let level_str = if self.use_colors {
            format!("{:5}", entry.level.to_str())
                .color(entry.level.color_code())
                .to_string()
        } else {
            format!("{:5}", entry.level.to_str())
        };

        let caller = entry
            .entry_properties
            .get(keys::CALLING_CLASS_NAME)
            .map(String::as_str)
            .unwrap_or("-");

        let mut line = format!(
            "[{}] [{}] {} - {}",
            self.timestamp_format.format(&entry.timestamp),
            level_str,
            caller,
            entry.message
        );

        if self.show_properties {
            let mut extras: Vec<_> = entry
                .entry_properties
                .iter()
                .filter(|(key, _)| !is_reserved(key))
                .collect();
            extras.sort();
            for (key, value) in extras {
                line.push_str(&format!(" {}={}", key, value));
            }
        }

        if let Some(exception) = &entry.exception {
            line.push('\n');
            line.push_str(&exception.to_string());
        }

        line
    }
}

fn is_reserved(key: &str) -> bool {
    matches!(
        key,
        keys::TIMESTAMP
            | keys::LOG_LEVEL
            | keys::MESSAGE
            | keys::EXCEPTION
            | keys::CALLING_CLASS_NAME
            | keys::CALLING_METHOD_NAME
            | keys::CALLING_FILE_NAME
            | keys::CALLING_LINE_NUMBER
    ) || key.starts_with(keys::EXCEPTION_DATA_PREFIX)
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&self, entry: &LogEntry) -> Result<()> {
        let output = self.format_line(entry);

        match entry.level {
            LogLevel::Error | LogLevel::Fatal => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorInfo;

    #[test]
    fn test_plain_line() {
        let sink = ConsoleSink::with_colors(false).with_properties(true);
        let mut entry = LogEntry::new(LogLevel::Warn, "cache miss");
        entry
            .entry_properties
            .insert("callingClassName".into(), "app::cache".into());
        entry.entry_properties.insert("message".into(), "cache miss".into());
        entry.entry_properties.insert("key".into(), "user:7".into());

        let line = sink.format_line(&entry);
        assert!(line.contains("[Warn ]"));
        assert!(line.contains("app::cache - cache miss"));
        assert!(line.ends_with(" key=user:7"));
    }

    #[test]
    fn test_exception_on_next_line() {
        let sink = ConsoleSink::with_colors(false);
        let entry = LogEntry::new(LogLevel::Error, "failed")
            .with_exception(ErrorInfo::new("timeout"));

        let line = sink.format_line(&entry);
        assert!(line.ends_with("\nError: timeout"));
    }
}
