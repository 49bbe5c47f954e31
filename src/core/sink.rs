//! Sink trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// Destination that stores or forwards entries
///
/// A logger may call `write` from several threads at once, so sinks use
/// interior mutability for any state they keep.
pub trait Sink: Send + Sync {
    fn write(&self, entry: &LogEntry) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

impl<S: Sink + ?Sized> Sink for std::sync::Arc<S> {
    fn write(&self, entry: &LogEntry) -> Result<()> {
        (**self).write(entry)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
