//! Sink implementations

pub mod aggregate;
pub mod collecting;
#[cfg(feature = "console")]
pub mod console;
pub mod json_file;
pub mod log_backend;

pub use aggregate::AggregateSink;
pub use collecting::CollectingSink;
#[cfg(feature = "console")]
pub use console::ConsoleSink;
pub use json_file::JsonFileSink;
pub use log_backend::LogBackendSink;

pub use crate::core::Sink;

use crate::core::{LogEntry, Result};

/// Discards every entry; used when a logger is built without a sink
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl Sink for NullSink {
    fn write(&self, _entry: &LogEntry) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}
