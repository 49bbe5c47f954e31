//! JSON lines file sink

use crate::core::{LogEntry, Result, Sink};
use crate::layout::{JsonLayout, PropertyBag};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends each entry to a file as one ordered JSON object per line
///
/// The object holds the merged properties (entry over context) rendered
/// with [`JsonLayout`], so `timestamp`, `loglevel` and `message` lead every
/// line. Compatible with log aggregation tools that ingest JSONL.
pub struct JsonFileSink {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
    layout: JsonLayout,
    flush_each_write: bool,
}

impl JsonFileSink {
    /// Open (or create) `path` for appending
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
            layout: JsonLayout::new(),
            flush_each_write: false,
        })
    }

    #[must_use]
    pub fn with_layout(mut self, layout: JsonLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Flush after every entry instead of relying on the buffer
    #[must_use]
    pub fn with_flush_each_write(mut self, enabled: bool) -> Self {
        self.flush_each_write = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn to_bag(entry: &LogEntry) -> PropertyBag {
        let mut bag = PropertyBag::new();
        for (key, value) in &entry.context_properties {
            bag.insert(key.as_str(), value.as_str());
        }
        for (key, value) in &entry.entry_properties {
            bag.insert(key.as_str(), value.as_str());
        }
        bag
    }
}

impl Sink for JsonFileSink {
    fn write(&self, entry: &LogEntry) -> Result<()> {
        let bag = Self::to_bag(entry);
        let mut writer = self.writer.lock();
        self.layout.format_to(&mut *writer, &bag)?;
        if self.flush_each_write {
            writer.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json-file"
    }
}

impl Drop for JsonFileSink {
    fn drop(&mut self) {
        if let Err(e) = self.writer.get_mut().flush() {
            eprintln!(
                "[LOGGER WARNING] Failed to flush {} on drop: {}",
                self.path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use serde_json::{Map, Value};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_json_file_sink() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("test.jsonl");

        let sink = JsonFileSink::new(&log_path)?;

        let mut entry = LogEntry::new(LogLevel::Info, "User logged in");
        entry.entry_properties.insert("message".into(), "User logged in".into());
        entry.entry_properties.insert("loglevel".into(), "Info".into());
        entry.entry_properties.insert("user_id".into(), "123".into());
        entry.context_properties.insert("host".into(), "web-1".into());

        sink.write(&entry)?;
        sink.flush()?;

        let content = fs::read_to_string(&log_path)?;
        let parsed: Map<String, Value> = serde_json::from_str(content.trim_end())?;
        let keys: Vec<&String> = parsed.keys().collect();
        assert_eq!(keys[..3], ["timestamp", "loglevel", "message"]);
        assert_eq!(parsed["user_id"], "123");
        assert_eq!(parsed["host"], "web-1");

        Ok(())
    }

    #[test]
    fn test_multiple_entries_one_line_each() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("test_multiple.jsonl");

        {
            let sink = JsonFileSink::new(&log_path)?;
            for i in 0..5 {
                let mut entry = LogEntry::new(LogLevel::Debug, format!("Iteration {}", i));
                entry.entry_properties.insert("iteration".into(), i.to_string());
                sink.write(&entry)?;
            }
        }

        let content = fs::read_to_string(&log_path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5);

        for (i, line) in lines.iter().enumerate() {
            let parsed: Value = serde_json::from_str(line)?;
            assert_eq!(parsed["iteration"], i.to_string());
        }

        Ok(())
    }
}
