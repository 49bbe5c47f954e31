//! Adapter forwarding entries to a `log` facade backend

use crate::core::{keys, LogEntry, LogLevel, Result, Sink, ThreadContext};
use crate::layout::PropertyBag;

enum Backend {
    /// Whatever `log::set_logger` installed
    Global,
    Owned(Box<dyn log::Log>),
}

/// Sink that turns each entry into a `log::Record`
///
/// The record carries the merged properties as key-values: context
/// properties first, entry properties overwriting them, then
/// `LoggerName`. The record target is the logger name.
///
/// Each write also copies the entry's context properties into the
/// current [`ThreadContext`] so other code logging through the same
/// backend on this thread carries the same context.
///
/// ```
/// use rust_structured_logger::prelude::*;
/// use rust_structured_logger::layout::JsonLogWriter;
///
/// let sink = LogBackendSink::new(JsonLogWriter::new(std::io::stdout()), "orders");
/// let logger = Logger::builder().sink(sink).build();
/// logger.info("order placed");
/// ```
pub struct LogBackendSink {
    backend: Backend,
    logger_name: String,
    mirror_thread_context: bool,
}

impl LogBackendSink {
    /// Forward to the globally installed `log` logger
    pub fn global(logger_name: impl Into<String>) -> Self {
        Self {
            backend: Backend::Global,
            logger_name: logger_name.into(),
            mirror_thread_context: true,
        }
    }

    /// Forward to `backend` directly
    pub fn new<L: log::Log + 'static>(backend: L, logger_name: impl Into<String>) -> Self {
        Self {
            backend: Backend::Owned(Box::new(backend)),
            logger_name: logger_name.into(),
            mirror_thread_context: true,
        }
    }

    /// Enable or disable copying context properties into [`ThreadContext`]
    #[must_use]
    pub fn with_thread_context_mirroring(mut self, enabled: bool) -> Self {
        self.mirror_thread_context = enabled;
        self
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    fn backend(&self) -> &dyn log::Log {
        match &self.backend {
            Backend::Global => log::logger(),
            Backend::Owned(backend) => backend.as_ref(),
        }
    }

    /// `log` has no fatal level; Fatal maps to Error
    pub fn translate_level(level: LogLevel) -> log::Level {
        match level {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error | LogLevel::Fatal => log::Level::Error,
        }
    }

    /// The key-values attached to the forwarded record
    pub fn property_bag(&self, entry: &LogEntry) -> PropertyBag {
        let mut bag = PropertyBag::new();
        for (key, value) in &entry.context_properties {
            bag.insert(key.as_str(), value.as_str());
        }
        for (key, value) in &entry.entry_properties {
            bag.insert(key.as_str(), value.as_str());
        }
        bag.insert(keys::LOGGER_NAME, self.logger_name.as_str());
        bag
    }
}

impl Sink for LogBackendSink {
    fn write(&self, entry: &LogEntry) -> Result<()> {
        if self.mirror_thread_context {
            ThreadContext::extend(&entry.context_properties);
        }

        let bag = self.property_bag(entry);
        let level = Self::translate_level(entry.level);
        let file = entry.entry_properties.get(keys::CALLING_FILE_NAME);
        let line = entry
            .entry_properties
            .get(keys::CALLING_LINE_NUMBER)
            .and_then(|line| line.parse::<u32>().ok());

        self.backend().log(
            &log::Record::builder()
                .args(format_args!("{}", entry.message))
                .level(level)
                .target(&self.logger_name)
                .file(file.map(String::as_str))
                .line(line)
                .key_values(&bag)
                .build(),
        );
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.backend().flush();
        Ok(())
    }

    fn name(&self) -> &str {
        "log-backend"
    }
}
