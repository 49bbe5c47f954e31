//! Thread-ambient property store
//!
//! Properties set here are visible to any code running on the same
//! thread that renders through [`JsonLogWriter`](crate::layout::JsonLogWriter),
//! including third-party crates logging through the `log` facade.
//! [`LogBackendSink`](crate::sinks::LogBackendSink) mirrors each entry's
//! context properties into it.

use std::cell::RefCell;
use std::collections::BTreeMap;

thread_local! {
    static PROPERTIES: RefCell<BTreeMap<String, String>> = RefCell::new(BTreeMap::new());
}

/// Accessors for the current thread's ambient properties
pub struct ThreadContext;

impl ThreadContext {
    pub fn set(key: impl Into<String>, value: impl Into<String>) {
        PROPERTIES.with(|props| {
            props.borrow_mut().insert(key.into(), value.into());
        });
    }

    pub fn get(key: &str) -> Option<String> {
        PROPERTIES.with(|props| props.borrow().get(key).cloned())
    }

    pub fn remove(key: &str) -> Option<String> {
        PROPERTIES.with(|props| props.borrow_mut().remove(key))
    }

    pub fn clear() {
        PROPERTIES.with(|props| props.borrow_mut().clear());
    }

    /// Copy of every property set on this thread
    pub fn snapshot() -> BTreeMap<String, String> {
        PROPERTIES.with(|props| props.borrow().clone())
    }

    pub(crate) fn extend<'a, I>(pairs: I)
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        PROPERTIES.with(|props| {
            let mut props = props.borrow_mut();
            for (key, value) in pairs {
                props.insert(key.clone(), value.clone());
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        ThreadContext::clear();
        ThreadContext::set("requestId", "r-77");
        assert_eq!(ThreadContext::get("requestId").as_deref(), Some("r-77"));
        assert_eq!(ThreadContext::remove("requestId").as_deref(), Some("r-77"));
        assert!(ThreadContext::get("requestId").is_none());
    }

    #[test]
    fn test_properties_are_per_thread() {
        ThreadContext::clear();
        ThreadContext::set("tenant", "main-thread");

        let seen = std::thread::spawn(|| ThreadContext::get("tenant"))
            .join()
            .unwrap();

        assert!(seen.is_none());
        assert_eq!(ThreadContext::snapshot().len(), 1);
        ThreadContext::clear();
    }
}
