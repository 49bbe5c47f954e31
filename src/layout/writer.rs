//! `log` facade backend that writes ordered JSON lines

use super::{json_layout::JsonLayout, property_bag::PropertyBag};
use crate::core::{keys, ThreadContext, TimestampFormat};
use chrono::Utc;
use parking_lot::Mutex;
use std::io::Write;

/// A `log::Log` implementation rendering each record with [`JsonLayout`]
///
/// The record's key-values form the bag. `timestamp`, `loglevel` and
/// `message` are derived from the record when it does not carry them, and
/// properties from the current [`ThreadContext`] are appended for keys the
/// record left unset.
///
/// ```
/// use rust_structured_logger::layout::JsonLogWriter;
///
/// let writer = JsonLogWriter::new(Vec::new());
/// log::Log::log(
///     &writer,
///     &log::Record::builder()
///         .level(log::Level::Info)
///         .args(format_args!("ready"))
///         .build(),
/// );
///
/// let out = String::from_utf8(writer.into_inner()).unwrap();
/// assert!(out.starts_with("{\"timestamp\":"));
/// assert!(out.contains("\"message\":\"ready\""));
/// ```
pub struct JsonLogWriter<W: Write + Send> {
    writer: Mutex<W>,
    layout: JsonLayout,
    timestamp_format: TimestampFormat,
    max_level: log::LevelFilter,
}

impl<W: Write + Send> JsonLogWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            layout: JsonLayout::new(),
            timestamp_format: TimestampFormat::default(),
            max_level: log::LevelFilter::Trace,
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: JsonLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Format for `timestamp` when the record carries none
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_max_level(mut self, level: log::LevelFilter) -> Self {
        self.max_level = level;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    /// Build the bag that would be written for `record`
    pub fn property_bag(&self, record: &log::Record<'_>) -> PropertyBag {
        let mut bag = PropertyBag::from_source(record.key_values());

        bag.insert_if_absent(keys::TIMESTAMP, self.timestamp_format.format(&Utc::now()));
        bag.insert_if_absent(keys::LOG_LEVEL, level_name(record.level()));
        bag.insert_if_absent(keys::MESSAGE, record.args().to_string());

        for (key, value) in ThreadContext::snapshot() {
            bag.insert_if_absent(key, value);
        }

        bag
    }
}

impl<W: Write + Send> log::Log for JsonLogWriter<W> {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let bag = self.property_bag(record);
        let mut writer = self.writer.lock();
        if let Err(e) = self.layout.format_to(&mut *writer, &bag) {
            eprintln!("[LOGGER ERROR] JSON writer failed: {}", e);
        }
    }

    fn flush(&self) {
        if let Err(e) = self.writer.lock().flush() {
            eprintln!("[LOGGER ERROR] JSON writer flush failed: {}", e);
        }
    }
}

/// Level names used in the `loglevel` property
fn level_name(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "Error",
        log::Level::Warn => "Warn",
        log::Level::Info => "Info",
        log::Level::Debug => "Debug",
        log::Level::Trace => "Trace",
    }
}
