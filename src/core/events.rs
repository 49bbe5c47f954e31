//! Notification registries
//!
//! - `ErrorReporter`: multicast registry for failures caught by exception
//!   isolation. One process-wide instance is available through
//!   [`ErrorReporter::global`]; loggers can also be given their own.
//! - `EntryWrittenHandlers`: per-logger handlers fired after a successful write.

use super::{error::LoggerError, log_entry::LogEntry, logger::Logger};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// Handler invoked with the logger that caught the failure and the failure
pub type ErrorHandler = Arc<dyn Fn(&Logger, &LoggerError) + Send + Sync>;

/// Handler invoked with the logger and the entry it just wrote
pub type EntryWrittenHandler = Arc<dyn Fn(&Logger, &LogEntry) + Send + Sync>;

/// Token returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

static NEXT_SUBSCRIPTION: AtomicU64 = AtomicU64::new(1);

impl SubscriptionId {
    fn next() -> Self {
        SubscriptionId(NEXT_SUBSCRIPTION.fetch_add(1, Ordering::Relaxed))
    }
}

/// Ordered list of subscribers
///
/// Handlers are cloned out of the lock before being called, so a handler
/// may subscribe or unsubscribe without deadlocking.
struct Registry<H> {
    handlers: RwLock<Vec<(SubscriptionId, H)>>,
}

impl<H: Clone> Registry<H> {
    fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
        }
    }

    fn add(&self, handler: H) -> SubscriptionId {
        let id = SubscriptionId::next();
        self.handlers.write().push((id, handler));
        id
    }

    fn remove(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    fn snapshot(&self) -> Vec<H> {
        self.handlers.read().iter().map(|(_, h)| h.clone()).collect()
    }

    fn len(&self) -> usize {
        self.handlers.read().len()
    }

    fn clear(&self) {
        self.handlers.write().clear();
    }
}

/// Thread-safe multicast registry for logging failures
///
/// Cloning shares the same subscriber list.
///
/// # Example
///
/// ```
/// use rust_structured_logger::ErrorReporter;
/// let reporter = ErrorReporter::new();
/// let id = reporter.subscribe(|_logger, err| {
///     eprintln!("logging failed: {}", err);
/// });
/// assert_eq!(reporter.subscriber_count(), 1);
/// assert!(reporter.unsubscribe(id));
/// ```
#[derive(Clone)]
pub struct ErrorReporter {
    registry: Arc<Registry<ErrorHandler>>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry::new()),
        }
    }

    /// The process-wide reporter used by loggers that were not given one
    pub fn global() -> &'static ErrorReporter {
        static GLOBAL: OnceLock<ErrorReporter> = OnceLock::new();
        GLOBAL.get_or_init(ErrorReporter::new)
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&Logger, &LoggerError) + Send + Sync + 'static,
    {
        self.registry.add(Arc::new(handler))
    }

    /// Returns `false` if the id was not subscribed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.registry.remove(id)
    }

    /// Remove every subscriber
    pub fn clear(&self) {
        self.registry.clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.len()
    }

    /// Notify every subscriber synchronously on the calling thread
    ///
    /// With no subscribers the failure is written to stderr. A panicking
    /// handler is contained so the remaining handlers still run.
    pub fn report(&self, source: &Logger, error: &LoggerError) {
        let handlers = self.registry.snapshot();
        if handlers.is_empty() {
            eprintln!("[LOGGER ERROR] {}", error);
            return;
        }

        for (idx, handler) in handlers.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                handler(source, error)
            }));
            if let Err(payload) = result {
                eprintln!(
                    "[LOGGER CRITICAL] Error handler #{} panicked: {}. \
                     Other handlers continue to run.",
                    idx,
                    LoggerError::from_panic(payload)
                );
            }
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorReporter")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Per-logger "entry written" subscribers
pub(crate) struct EntryWrittenHandlers {
    registry: Registry<EntryWrittenHandler>,
}

impl EntryWrittenHandlers {
    pub(crate) fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    pub(crate) fn add(&self, handler: EntryWrittenHandler) -> SubscriptionId {
        self.registry.add(handler)
    }

    pub(crate) fn remove(&self, id: SubscriptionId) -> bool {
        self.registry.remove(id)
    }

    /// Handler panics propagate to the caller, which applies isolation
    pub(crate) fn fire(&self, source: &Logger, entry: &LogEntry) {
        for handler in self.registry.snapshot() {
            handler(source, entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_subscription_ids_are_unique() {
        let a = SubscriptionId::next();
        let b = SubscriptionId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn test_subscribe_and_report() {
        let reporter = ErrorReporter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        reporter.subscribe(move |_, _| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        let logger = Logger::builder().build();
        reporter.report(&logger, &LoggerError::other("x"));
        reporter.report(&logger, &LoggerError::other("y"));

        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let reporter = ErrorReporter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        let id = reporter.subscribe(move |_, _| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(reporter.unsubscribe(id));
        assert!(!reporter.unsubscribe(id));

        let logger = Logger::builder().build();
        reporter.report(&logger, &LoggerError::other("x"));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_panicking_handler_does_not_block_others() {
        let reporter = ErrorReporter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        reporter.subscribe(|_, _| panic!("handler bug"));
        reporter.subscribe(move |_, _| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        let logger = Logger::builder().build();
        reporter.report(&logger, &LoggerError::other("x"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handler_may_unsubscribe_itself() {
        let reporter = ErrorReporter::new();
        let reporter_clone = reporter.clone();
        let slot: Arc<parking_lot::Mutex<Option<SubscriptionId>>> =
            Arc::new(parking_lot::Mutex::new(None));
        let slot_clone = Arc::clone(&slot);

        let id = reporter.subscribe(move |_, _| {
            if let Some(id) = *slot_clone.lock() {
                reporter_clone.unsubscribe(id);
            }
        });
        *slot.lock() = Some(id);

        let logger = Logger::builder().build();
        reporter.report(&logger, &LoggerError::other("x"));
        assert_eq!(reporter.subscriber_count(), 0);
    }
}
