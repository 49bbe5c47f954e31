//! Main logger implementation
//!
//! A call flows through the logger in three steps:
//!
//! 1. the handled-level check, before any work is done for the entry;
//! 2. enrichment by the [`EntryBuilder`];
//! 3. dispatch to the sink followed by the "entry written" notification.
//!
//! Steps 2 and 3 run under exception isolation: when enabled, errors and
//! panics are reported through the [`ErrorReporter`] and never reach the
//! caller.

use super::{
    app_identity::AppIdentity,
    caller::{CallSite, CallSiteLocator, CallerLocator},
    config::LoggerConfig,
    context::{ApplicationContextProvider, ContextProvider},
    entry_builder::EntryBuilder,
    error::{LoggerError, Result},
    error_info::ErrorInfo,
    events::{EntryWrittenHandlers, ErrorReporter, SubscriptionId},
    log_entry::LogEntry,
    log_level::{LevelSet, LogLevel},
    metrics::LoggerMetrics,
    properties::Properties,
    sink::Sink,
    timestamp::TimestampFormat,
};
use crate::sinks::NullSink;
use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

pub struct Logger {
    name: String,
    sink: Arc<dyn Sink>,
    builder: EntryBuilder,
    levels_handled: AtomicU8,
    use_exception_handling: AtomicBool,
    error_reporter: ErrorReporter,
    entry_written: EntryWrittenHandlers,
    /// Metrics for observability (written, filtered, errors)
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_structured_logger::prelude::*;
    ///
    /// let sink = std::sync::Arc::new(CollectingSink::new());
    /// let logger = Logger::builder()
    ///     .sink(sink.clone())
    ///     .levels_handled([LogLevel::Info, LogLevel::Error])
    ///     .build();
    ///
    /// logger.info("service started");
    /// logger.debug("not handled");
    /// assert_eq!(sink.len(), 1);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    /// Levels this logger currently writes
    pub fn levels_handled(&self) -> LevelSet {
        LevelSet::from_bits(self.levels_handled.load(Ordering::Acquire))
    }

    /// Replace the handled levels; applies from the next call on
    pub fn set_levels_handled(&self, levels: impl Into<LevelSet>) {
        self.levels_handled
            .store(levels.into().bits(), Ordering::Release);
    }

    pub fn enable_level(&self, level: LogLevel) {
        self.levels_handled
            .fetch_or(LevelSet::from(level).bits(), Ordering::AcqRel);
    }

    pub fn disable_level(&self, level: LogLevel) {
        self.levels_handled
            .fetch_and(!LevelSet::from(level).bits(), Ordering::AcqRel);
    }

    /// Whether failures inside the write path are caught and reported
    pub fn use_exception_handling(&self) -> bool {
        self.use_exception_handling.load(Ordering::Acquire)
    }

    /// Disable to let failures propagate (tests, strict environments)
    pub fn set_use_exception_handling(&self, enabled: bool) {
        self.use_exception_handling.store(enabled, Ordering::Release);
    }

    /// True iff `level` is in the handled set
    #[inline]
    pub fn should_log(&self, level: LogLevel) -> bool {
        let levels = self.levels_handled();
        !levels.is_empty() && levels.contains(level)
    }

    pub fn error_reporter(&self) -> &ErrorReporter {
        &self.error_reporter
    }

    /// Get the logger metrics
    ///
    /// # Example
    ///
    /// ```
    /// use rust_structured_logger::Logger;
    ///
    /// let logger = Logger::builder().build();
    /// logger.info("hello");
    /// assert_eq!(logger.metrics().entries_written(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Subscribe to successful writes on this logger
    pub fn on_entry_written<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&Logger, &LogEntry) + Send + Sync + 'static,
    {
        self.entry_written.add(Arc::new(handler))
    }

    /// Returns `false` if the id was not subscribed
    pub fn remove_entry_written(&self, id: SubscriptionId) -> bool {
        self.entry_written.remove(id)
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.flush()
    }

    /// Enrich and write one entry
    ///
    /// Nothing is built for levels outside the handled set. Returns `Ok`
    /// whenever exception isolation is enabled.
    ///
    /// # Errors
    ///
    /// With exception isolation disabled, any enrichment, sink or
    /// notification failure is returned.
    #[track_caller]
    pub fn write(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        exception: Option<ErrorInfo>,
        extra: Option<&Properties>,
    ) -> Result<()> {
        self.write_at(CallSite::caller(), level, message, exception, extra)
    }

    /// [`Logger::write`] with an explicit call site (used by the macros)
    pub fn write_at(
        &self,
        site: CallSite,
        level: LogLevel,
        message: impl Into<String>,
        exception: Option<ErrorInfo>,
        extra: Option<&Properties>,
    ) -> Result<()> {
        if !self.should_log(level) {
            self.metrics.record_filtered();
            return Ok(());
        }

        self.isolate(|| {
            let entry = self
                .builder
                .build(level, message.into(), exception, extra, &site)?;
            self.metrics.record_built();
            self.dispatch(&entry)
        })
    }

    /// Write with extra properties taken from any serializable value
    ///
    /// The value's top-level fields become entry properties. A value that
    /// does not serialize to an object is an enrichment failure.
    ///
    /// ```
    /// use rust_structured_logger::prelude::*;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Shipment { id: u64, carrier: &'static str }
    ///
    /// let sink = std::sync::Arc::new(CollectingSink::new());
    /// let logger = Logger::builder().sink(sink.clone()).build();
    /// logger
    ///     .write_object(LogLevel::Info, "shipped", None, &Shipment { id: 9, carrier: "dhl" })
    ///     .unwrap();
    ///
    /// assert_eq!(sink.entries()[0].entry_properties["carrier"], "dhl");
    /// ```
    #[track_caller]
    pub fn write_object<T: Serialize + ?Sized>(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        exception: Option<ErrorInfo>,
        extra: &T,
    ) -> Result<()> {
        if !self.should_log(level) {
            self.metrics.record_filtered();
            return Ok(());
        }

        let site = CallSite::caller();
        self.isolate(|| {
            let props = Properties::from_serialize(extra)?;
            let entry = self
                .builder
                .build(level, message.into(), exception, Some(&props), &site)?;
            self.metrics.record_built();
            self.dispatch(&entry)
        })
    }

    /// Hand an already built entry to the sink
    ///
    /// Level filtering is not applied on this path.
    ///
    /// # Errors
    ///
    /// With exception isolation disabled, sink and notification failures
    /// are returned.
    pub fn write_entry(&self, entry: &LogEntry) -> Result<()> {
        self.isolate(|| self.dispatch(entry))
    }

    fn dispatch(&self, entry: &LogEntry) -> Result<()> {
        self.sink.write(entry)?;
        self.metrics.record_written();
        self.entry_written.fire(self, entry);
        Ok(())
    }

    /// Run `action` under the exception isolation policy
    fn isolate<F>(&self, action: F) -> Result<()>
    where
        F: FnOnce() -> Result<()>,
    {
        if !self.use_exception_handling() {
            return action();
        }

        let error = match catch_unwind(AssertUnwindSafe(action)) {
            Ok(Ok(())) => return Ok(()),
            Ok(Err(e)) => e,
            Err(payload) => LoggerError::from_panic(payload),
        };

        self.metrics.record_error();
        self.error_reporter.report(self, &error);
        Ok(())
    }

    /// Fire-and-forget write used by the level helpers
    ///
    /// Only fails when isolation is disabled; the failure then panics at
    /// the caller.
    #[track_caller]
    fn emit(
        &self,
        site: CallSite,
        level: LogLevel,
        message: impl Into<String>,
        exception: Option<ErrorInfo>,
        extra: Option<&Properties>,
    ) {
        if let Err(e) = self.write_at(site, level, message, exception, extra) {
            panic!("[LOGGER ERROR] {}", e);
        }
    }

    /// Entry point of the logging macros
    ///
    /// The message is only rendered when `level` is handled.
    #[doc(hidden)]
    #[track_caller]
    pub fn log_fmt(
        &self,
        site: CallSite,
        level: LogLevel,
        exception: Option<ErrorInfo>,
        props: Option<&Properties>,
        args: std::fmt::Arguments<'_>,
    ) {
        if !self.should_log(level) {
            self.metrics.record_filtered();
            return;
        }
        self.emit(site, level, args.to_string(), exception, props);
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.emit(CallSite::caller(), level, message, None, None);
    }

    #[track_caller]
    pub fn log_with_props(&self, level: LogLevel, message: impl Into<String>, props: &Properties) {
        self.emit(CallSite::caller(), level, message, None, Some(props));
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.emit(CallSite::caller(), LogLevel::Debug, message, None, None);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.emit(CallSite::caller(), LogLevel::Info, message, None, None);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        self.emit(CallSite::caller(), LogLevel::Warn, message, None, None);
    }

    /// Log an error, optionally with the error that caused it
    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>, exception: impl Into<Option<ErrorInfo>>) {
        self.emit(CallSite::caller(), LogLevel::Error, message, exception.into(), None);
    }

    #[inline]
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>, exception: impl Into<Option<ErrorInfo>>) {
        self.emit(CallSite::caller(), LogLevel::Fatal, message, exception.into(), None);
    }

    #[track_caller]
    pub fn debug_with_props(&self, message: impl Into<String>, props: &Properties) {
        self.emit(CallSite::caller(), LogLevel::Debug, message, None, Some(props));
    }

    #[track_caller]
    pub fn info_with_props(&self, message: impl Into<String>, props: &Properties) {
        self.emit(CallSite::caller(), LogLevel::Info, message, None, Some(props));
    }

    #[track_caller]
    pub fn warn_with_props(&self, message: impl Into<String>, props: &Properties) {
        self.emit(CallSite::caller(), LogLevel::Warn, message, None, Some(props));
    }

    #[track_caller]
    pub fn error_with_props(
        &self,
        message: impl Into<String>,
        exception: impl Into<Option<ErrorInfo>>,
        props: &Properties,
    ) {
        self.emit(
            CallSite::caller(),
            LogLevel::Error,
            message,
            exception.into(),
            Some(props),
        );
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("sink", &self.sink.name())
            .field("levels_handled", &self.levels_handled())
            .field("use_exception_handling", &self.use_exception_handling())
            .finish()
    }
}

impl Default for Logger {
    fn default() -> Self {
        LoggerBuilder::new().build()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_structured_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .name("checkout")
///     .levels_handled(LevelSet::at_least(LogLevel::Info))
///     .context_provider(StaticContextProvider::new(Context::new("svc-checkout")))
///     .app_identity(AppIdentity::new("checkout", "3.1.0"))
///     .use_exception_handling(true)
///     .build();
///
/// assert!(!logger.should_log(LogLevel::Debug));
/// ```
pub struct LoggerBuilder {
    name: String,
    sink: Option<Arc<dyn Sink>>,
    context_provider: Arc<dyn ContextProvider>,
    caller_locator: Arc<dyn CallerLocator>,
    app_identity: AppIdentity,
    timestamp_format: TimestampFormat,
    levels_handled: LevelSet,
    use_exception_handling: bool,
    error_reporter: Option<ErrorReporter>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            name: "Logger".to_string(),
            sink: None,
            context_provider: Arc::new(ApplicationContextProvider::new()),
            caller_locator: Arc::new(CallSiteLocator),
            app_identity: AppIdentity::default(),
            timestamp_format: TimestampFormat::default(),
            levels_handled: LevelSet::all(),
            use_exception_handling: true,
            error_reporter: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the sink entries are written to
    ///
    /// Without a sink, entries are discarded.
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn shared_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn context_provider<P: ContextProvider + 'static>(mut self, provider: P) -> Self {
        self.context_provider = Arc::new(provider);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller_locator<L: CallerLocator + 'static>(mut self, locator: L) -> Self {
        self.caller_locator = Arc::new(locator);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn app_identity(mut self, identity: AppIdentity) -> Self {
        self.app_identity = identity;
        self
    }

    /// Set the format of the `timestamp` entry property
    ///
    /// A custom pattern that fails [`TimestampFormat::validate`] is replaced
    /// by the default format when the logger is built.
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Set handled levels (default: all)
    #[must_use = "builder methods return a new value"]
    pub fn levels_handled(mut self, levels: impl Into<LevelSet>) -> Self {
        self.levels_handled = levels.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn use_exception_handling(mut self, enabled: bool) -> Self {
        self.use_exception_handling = enabled;
        self
    }

    /// Report failures to `reporter` instead of [`ErrorReporter::global`]
    #[must_use = "builder methods return a new value"]
    pub fn error_reporter(mut self, reporter: ErrorReporter) -> Self {
        self.error_reporter = Some(reporter);
        self
    }

    /// Apply name, levels, isolation flag and timestamp format from a config
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.levels_handled = config.level_set();
        self.name = config.name;
        self.use_exception_handling = config.use_exception_handling;
        self.timestamp_format = config.timestamp_format;
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let timestamp_format = match self.timestamp_format.validate() {
            Ok(()) => self.timestamp_format,
            Err(e) => {
                eprintln!("[LOGGER WARNING] {}; using the default timestamp format", e);
                TimestampFormat::default()
            }
        };

        Logger {
            name: self.name,
            sink: self.sink.unwrap_or_else(|| Arc::new(NullSink)),
            builder: EntryBuilder::new(
                self.context_provider,
                self.caller_locator,
                self.app_identity,
                timestamp_format,
            ),
            levels_handled: AtomicU8::new(self.levels_handled.bits()),
            use_exception_handling: AtomicBool::new(self.use_exception_handling),
            error_reporter: self
                .error_reporter
                .unwrap_or_else(|| ErrorReporter::global().clone()),
            entry_written: EntryWrittenHandlers::new(),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::{Context, StaticContextProvider};
    use crate::sinks::CollectingSink;
    use std::sync::atomic::AtomicUsize;

    struct FailingSink;

    impl Sink for FailingSink {
        fn write(&self, _entry: &LogEntry) -> Result<()> {
            Err(LoggerError::sink("failing", "backend unavailable"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn collecting_logger() -> (Logger, Arc<CollectingSink>) {
        let sink = Arc::new(CollectingSink::new());
        let logger = Logger::builder()
            .sink(Arc::clone(&sink))
            .context_provider(StaticContextProvider::new(Context::new("tester")))
            .error_reporter(ErrorReporter::new())
            .build();
        (logger, sink)
    }

    #[test]
    fn test_builder_defaults() {
        let logger = Logger::builder().build();
        assert_eq!(logger.levels_handled(), LevelSet::all());
        assert!(logger.use_exception_handling());
        assert_eq!(logger.sink().name(), "null");
    }

    #[test]
    fn test_info_writes_one_entry() {
        let (logger, sink) = collecting_logger();
        logger.info("A");

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Info);
        assert_eq!(entries[0].message, "A");
        assert_eq!(entries[0].username.as_deref(), Some("tester"));
    }

    #[test]
    fn test_filtered_level_builds_nothing() {
        let (logger, sink) = collecting_logger();
        logger.set_levels_handled(LogLevel::Info);

        logger.info("A");
        logger.debug("B");

        assert_eq!(sink.len(), 1);
        assert_eq!(logger.metrics().entries_built(), 1);
        assert_eq!(logger.metrics().entries_filtered(), 1);
    }

    #[test]
    fn test_empty_level_set_logs_nothing() {
        let (logger, sink) = collecting_logger();
        logger.set_levels_handled(LevelSet::empty());

        for level in LogLevel::ALL {
            assert!(!logger.should_log(level));
            logger.log(level, "dropped");
        }
        assert!(sink.is_empty());
    }

    #[test]
    fn test_enable_disable_level() {
        let (logger, sink) = collecting_logger();
        logger.disable_level(LogLevel::Warn);
        logger.warn("hidden");
        logger.enable_level(LogLevel::Warn);
        logger.warn("shown");

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "shown");
    }

    #[test]
    fn test_sink_failure_is_reported() {
        let reporter = ErrorReporter::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = Arc::clone(&seen);
        reporter.subscribe(move |source, err| {
            assert_eq!(source.name(), "billing");
            assert!(matches!(err, LoggerError::Sink { .. }));
            seen_clone.fetch_add(1, Ordering::SeqCst);
        });

        let logger = Logger::builder()
            .name("billing")
            .sink(FailingSink)
            .error_reporter(reporter)
            .build();

        assert!(logger.write(LogLevel::Info, "x", None, None).is_ok());
        logger.info("y");

        assert_eq!(seen.load(Ordering::SeqCst), 2);
        assert_eq!(logger.metrics().errors_reported(), 2);
        assert_eq!(logger.metrics().entries_written(), 0);
    }

    #[test]
    fn test_strict_mode_propagates() {
        let logger = Logger::builder()
            .sink(FailingSink)
            .error_reporter(ErrorReporter::new())
            .use_exception_handling(false)
            .build();

        let result = logger.write(LogLevel::Info, "x", None, None);
        assert!(matches!(result, Err(LoggerError::Sink { .. })));
    }

    #[test]
    #[should_panic(expected = "backend unavailable")]
    fn test_strict_mode_helpers_panic() {
        let logger = Logger::builder()
            .sink(FailingSink)
            .error_reporter(ErrorReporter::new())
            .use_exception_handling(false)
            .build();

        logger.info("x");
    }

    #[test]
    fn test_entry_written_fires_after_sink() {
        let (logger, sink) = collecting_logger();
        let sink_for_handler = Arc::clone(&sink);
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = Arc::clone(&fired);

        logger.on_entry_written(move |_, entry| {
            assert_eq!(sink_for_handler.len(), 1);
            assert_eq!(entry.message, "hello");
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });

        logger.info("hello");
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_remove_entry_written() {
        let (logger, _sink) = collecting_logger();
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = Arc::clone(&fired);
        let id = logger.on_entry_written(move |_, _| {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(logger.remove_entry_written(id));
        logger.info("hello");
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_panicking_handler_is_isolated() {
        let (logger, sink) = collecting_logger();
        logger.on_entry_written(|_, _| panic!("handler exploded"));

        logger.info("still written");

        assert_eq!(sink.len(), 1);
        assert_eq!(logger.metrics().errors_reported(), 1);
    }

    #[test]
    fn test_write_entry_bypasses_filter() {
        let (logger, sink) = collecting_logger();
        logger.set_levels_handled(LevelSet::empty());

        let entry = LogEntry::new(LogLevel::Debug, "prebuilt");
        logger.write_entry(&entry).unwrap();

        assert_eq!(sink.entries()[0].message, "prebuilt");
    }

    #[test]
    fn test_write_object_rejects_non_objects() {
        let (logger, sink) = collecting_logger();
        logger.set_use_exception_handling(false);

        let result = logger.write_object(LogLevel::Info, "m", None, &[1, 2, 3]);
        assert!(matches!(result, Err(LoggerError::Enrichment(_))));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_caller_location_points_at_call() {
        let (logger, sink) = collecting_logger();
        let line = line!() + 1;
        logger.info("where am I");

        let entries = sink.entries();
        let entry = &entries[0];
        assert!(entry.entry_properties["callingFileName"].ends_with("logger.rs"));
        assert_eq!(entry.entry_properties["callingLineNumber"], line.to_string());
    }

    #[test]
    fn test_invalid_custom_timestamp_uses_default() {
        for pattern in ["%Q", "%H:%M"] {
            let sink = Arc::new(CollectingSink::new());
            let logger = Logger::builder()
                .sink(Arc::clone(&sink))
                .timestamp_format(TimestampFormat::Custom(pattern.to_string()))
                .context_provider(StaticContextProvider::none())
                .error_reporter(ErrorReporter::new())
                .build();

            logger.info("stamped");

            let entries = sink.entries();
            assert_eq!(entries.len(), 1, "{}", pattern);
            let stamp = &entries[0].entry_properties["timestamp"];
            assert!(TimestampFormat::default().parse(stamp).is_some(), "{}", pattern);
            assert_eq!(logger.metrics().errors_reported(), 0);
        }
    }

    #[test]
    fn test_config_applies() {
        let config = LoggerConfig {
            name: "from-config".to_string(),
            levels_handled: vec![LogLevel::Error],
            use_exception_handling: false,
            timestamp_format: TimestampFormat::UnixMillis,
        };
        let logger = Logger::builder().config(config).build();

        assert_eq!(logger.name(), "from-config");
        assert!(logger.should_log(LogLevel::Error));
        assert!(!logger.should_log(LogLevel::Info));
        assert!(!logger.use_exception_handling());
    }
}
