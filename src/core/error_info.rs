//! Structured description of an error attached to a log entry

use super::properties::FieldValue;
use serde::{Deserialize, Serialize};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;

/// An error captured for logging
///
/// Holds the error's type name, message, the messages of its `source()`
/// chain, an optional stack text and a bag of extra data. Every non-null
/// data value ends up as an `exceptionData_<key>` entry property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub type_name: String,
    pub message: String,
    pub sources: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
    pub data: BTreeMap<String, FieldValue>,
}

impl ErrorInfo {
    /// Describe a plain message with no underlying error type
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            type_name: "Error".to_string(),
            message: message.into(),
            sources: Vec::new(),
            stack_trace: None,
            data: BTreeMap::new(),
        }
    }

    /// Describe a concrete error, walking its source chain
    ///
    /// A backtrace is captured when `RUST_BACKTRACE`/`RUST_LIB_BACKTRACE`
    /// enables it.
    pub fn from_error<E>(error: &E) -> Self
    where
        E: StdError + 'static,
    {
        let mut sources = Vec::new();
        let mut current = error.source();
        while let Some(source) = current {
            sources.push(source.to_string());
            current = source.source();
        }

        let backtrace = Backtrace::capture();
        let stack_trace = match backtrace.status() {
            BacktraceStatus::Captured => Some(backtrace.to_string()),
            _ => None,
        };

        Self {
            type_name: std::any::type_name::<E>().to_string(),
            message: error.to_string(),
            sources,
            stack_trace,
            data: BTreeMap::new(),
        }
    }

    /// Attach a data value
    #[must_use]
    pub fn with_data<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.data.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.message)?;
        for source in &self.sources {
            write!(f, "\n ---> {}", source)?;
        }
        if let Some(stack) = &self.stack_trace {
            write!(f, "\n{}", stack)?;
        }
        Ok(())
    }
}

impl<E> From<&E> for ErrorInfo
where
    E: StdError + 'static,
{
    fn from(error: &E) -> Self {
        ErrorInfo::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Debug)]
    struct Wrapped(io::Error);

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("could not load settings")
        }
    }

    impl StdError for Wrapped {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_from_error_walks_sources() {
        let err = Wrapped(io::Error::new(io::ErrorKind::NotFound, "settings.toml missing"));
        let info = ErrorInfo::from_error(&err);

        assert!(info.type_name.ends_with("Wrapped"));
        assert_eq!(info.message, "could not load settings");
        assert_eq!(info.sources, vec!["settings.toml missing".to_string()]);
    }

    #[test]
    fn test_display_is_stable() {
        let info = ErrorInfo::new("boom").with_stack_trace("at main");
        assert_eq!(info.to_string(), "Error: boom\nat main");
    }

    #[test]
    fn test_with_data() {
        let info = ErrorInfo::new("declined").with_data("code", 42);
        assert_eq!(info.data.get("code"), Some(&FieldValue::Int(42)));
    }
}
