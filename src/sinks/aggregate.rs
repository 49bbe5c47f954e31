//! Fan-out to several loggers

use crate::core::{LogEntry, Logger, Result, Sink};
use std::sync::Arc;

/// Forwards every entry to a list of child loggers
///
/// Entries go through each child's [`Logger::write_entry`], so each child
/// applies its own sink, isolation policy and notifications. Level
/// filtering happened on the parent and is not repeated.
///
/// ```
/// use rust_structured_logger::prelude::*;
/// use std::sync::Arc;
///
/// let audit = Arc::new(CollectingSink::new());
/// let ops = Arc::new(CollectingSink::new());
/// let fan_out = AggregateSink::new()
///     .with_logger(Arc::new(Logger::builder().sink(audit.clone()).build()))
///     .with_logger(Arc::new(Logger::builder().sink(ops.clone()).build()));
///
/// let logger = Logger::builder().sink(fan_out).build();
/// logger.warn("quota at 90%");
///
/// assert_eq!(audit.len(), 1);
/// assert_eq!(ops.len(), 1);
/// ```
#[derive(Default)]
pub struct AggregateSink {
    loggers: Vec<Arc<Logger>>,
}

impl AggregateSink {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_logger(mut self, logger: Arc<Logger>) -> Self {
        self.loggers.push(logger);
        self
    }

    pub fn loggers(&self) -> &[Arc<Logger>] {
        &self.loggers
    }
}

impl Sink for AggregateSink {
    /// Every child is attempted; the first failure is returned
    fn write(&self, entry: &LogEntry) -> Result<()> {
        let mut first_error = None;
        for logger in &self.loggers {
            if let Err(e) = logger.write_entry(entry) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for logger in &self.loggers {
            if let Err(e) = logger.flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn name(&self) -> &str {
        "aggregate"
    }
}
