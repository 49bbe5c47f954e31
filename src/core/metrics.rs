//! Logger metrics for observability
//!
//! Counters for monitoring logger health: entries written, calls skipped
//! by level filtering, and failures caught by exception isolation.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_structured_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_written();
/// metrics.record_filtered();
///
/// assert_eq!(metrics.entries_written(), 1);
/// assert_eq!(metrics.entries_filtered(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries accepted by the sink
    entries_written: AtomicU64,

    /// Calls rejected by the handled-level check before any enrichment
    entries_filtered: AtomicU64,

    /// Entries built by the enrichment step
    entries_built: AtomicU64,

    /// Failures reported through the error reporter
    errors_reported: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            entries_written: AtomicU64::new(0),
            entries_filtered: AtomicU64::new(0),
            entries_built: AtomicU64::new(0),
            errors_reported: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn entries_written(&self) -> u64 {
        self.entries_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn entries_filtered(&self) -> u64 {
        self.entries_filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn entries_built(&self) -> u64 {
        self.entries_built.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn errors_reported(&self) -> u64 {
        self.errors_reported.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.entries_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.entries_filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_built(&self) -> u64 {
        self.entries_built.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_error(&self) -> u64 {
        self.errors_reported.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed writes as a percentage (0.0 - 100.0) of attempted writes
    ///
    /// Returns 0.0 if nothing has been attempted.
    pub fn error_rate(&self) -> f64 {
        let errors = self.errors_reported() as f64;
        let total = self.entries_written() as f64 + errors;
        if total == 0.0 {
            0.0
        } else {
            (errors / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.entries_written.store(0, Ordering::Relaxed);
        self.entries_filtered.store(0, Ordering::Relaxed);
        self.entries_built.store(0, Ordering::Relaxed);
        self.errors_reported.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            entries_written: AtomicU64::new(self.entries_written()),
            entries_filtered: AtomicU64::new(self.entries_filtered()),
            entries_built: AtomicU64::new(self.entries_built()),
            errors_reported: AtomicU64::new(self.errors_reported()),
        }
    }
}
