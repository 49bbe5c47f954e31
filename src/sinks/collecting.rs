//! In-memory sink

use crate::core::{LogEntry, Result, Sink};
use parking_lot::Mutex;

/// Keeps every entry in write order
///
/// Mostly useful in tests: share it through an `Arc`, hand a clone to the
/// logger builder and inspect it afterwards.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: Mutex<Vec<LogEntry>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the stored entries
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Remove and return the stored entries
    pub fn take(&self) -> Vec<LogEntry> {
        std::mem::take(&mut *self.entries.lock())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Sink for CollectingSink {
    fn write(&self, entry: &LogEntry) -> Result<()> {
        self.entries.lock().push(entry.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "collecting"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    #[test]
    fn test_keeps_write_order() {
        let sink = CollectingSink::new();
        for i in 0..3 {
            sink.write(&LogEntry::new(LogLevel::Info, format!("m{}", i)))
                .unwrap();
        }

        let messages: Vec<String> = sink.entries().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["m0", "m1", "m2"]);
    }

    #[test]
    fn test_take_empties() {
        let sink = CollectingSink::new();
        sink.write(&LogEntry::new(LogLevel::Warn, "w")).unwrap();

        assert_eq!(sink.take().len(), 1);
        assert!(sink.is_empty());
    }
}
