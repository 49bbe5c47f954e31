//! Ambient identity context and the providers that supply it
//!
//! This module provides:
//! - `Context`: username plus arbitrary string properties
//! - `ContextProvider`: the swappable source of the current context
//! - `ApplicationContextProvider`: process-wide identity derived from the environment
//! - `StaticContextProvider`: a fixed context
//! - `SharedContextProvider` / `ContextGuard`: a replaceable context with RAII scoping

use super::error::Result;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

/// Ambient identity applied to every entry built while it is current
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub username: String,
    pub other_properties: BTreeMap<String, String>,
}

impl Context {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            other_properties: BTreeMap::new(),
        }
    }

    /// Add a property (builder version)
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.other_properties.insert(key.into(), value.into());
        self
    }
}

/// Source of the current [`Context`]
///
/// Called on every enriched log call, so implementations that are
/// expensive should cache. `Ok(None)` means no context is available and
/// nothing is added to the entry. Errors are caught by the logger's
/// exception isolation.
pub trait ContextProvider: Send + Sync {
    fn current(&self) -> Result<Option<Arc<Context>>>;
}

/// Identity of the running process owner, computed once and cached
///
/// The username is `DOMAIN\user` when `USERDOMAIN` is set, otherwise the
/// value of `USER` or `USERNAME`, otherwise `unknown`.
#[derive(Debug, Default)]
pub struct ApplicationContextProvider {
    current: OnceLock<Arc<Context>>,
}

impl ApplicationContextProvider {
    pub fn new() -> Self {
        Self {
            current: OnceLock::new(),
        }
    }

    fn environment_username() -> String {
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .ok()
            .filter(|u| !u.is_empty());

        match (std::env::var("USERDOMAIN").ok().filter(|d| !d.is_empty()), user) {
            (Some(domain), Some(user)) => format!("{}\\{}", domain, user),
            (None, Some(user)) => user,
            (_, None) => "unknown".to_string(),
        }
    }
}

impl ContextProvider for ApplicationContextProvider {
    fn current(&self) -> Result<Option<Arc<Context>>> {
        let context = self
            .current
            .get_or_init(|| Arc::new(Context::new(Self::environment_username())));
        Ok(Some(Arc::clone(context)))
    }
}

/// Always returns the same context
#[derive(Debug, Clone)]
pub struct StaticContextProvider {
    context: Option<Arc<Context>>,
}

impl StaticContextProvider {
    pub fn new(context: Context) -> Self {
        Self {
            context: Some(Arc::new(context)),
        }
    }

    /// A provider that never supplies a context
    pub fn none() -> Self {
        Self { context: None }
    }
}

impl ContextProvider for StaticContextProvider {
    fn current(&self) -> Result<Option<Arc<Context>>> {
        Ok(self.context.clone())
    }
}

/// A context that the host application replaces as it runs
/// (e.g. refreshed per request)
///
/// Thread-safe: can be shared across threads and updated while loggers read it.
///
/// # Example
///
/// ```
/// use rust_structured_logger::{Context, ContextProvider, SharedContextProvider};
///
/// let provider = SharedContextProvider::new();
/// {
///     let _guard = provider.scope(Context::new("alice").with_property("requestId", "r-1"));
///     let current = provider.current().unwrap().unwrap();
///     assert_eq!(current.username, "alice");
/// }
/// // previous (empty) context restored here
/// assert!(provider.current().unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedContextProvider {
    current: Arc<RwLock<Option<Arc<Context>>>>,
}

impl SharedContextProvider {
    pub fn new() -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
        }
    }

    pub fn with_context(context: Context) -> Self {
        let provider = Self::new();
        provider.set(context);
        provider
    }

    /// Replace the current context
    pub fn set(&self, context: Context) {
        *self.current.write() = Some(Arc::new(context));
    }

    /// Remove the current context
    pub fn clear(&self) {
        *self.current.write() = None;
    }

    /// Set one property on the current context, creating an anonymous
    /// context if none is set
    ///
    /// Entries already built keep the context they were built with.
    pub fn set_property(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut current = self.current.write();
        let mut context = current.as_deref().cloned().unwrap_or_default();
        context.other_properties.insert(key.into(), value.into());
        *current = Some(Arc::new(context));
    }

    /// Make `context` current until the returned guard is dropped
    pub fn scope(&self, context: Context) -> ContextGuard {
        let previous = self.current.write().replace(Arc::new(context));
        ContextGuard {
            slot: Arc::clone(&self.current),
            previous,
        }
    }
}

impl ContextProvider for SharedContextProvider {
    fn current(&self) -> Result<Option<Arc<Context>>> {
        Ok(self.current.read().clone())
    }
}

/// RAII guard for a scoped context
///
/// When dropped, restores whatever context was current before
/// [`SharedContextProvider::scope`] was called.
pub struct ContextGuard {
    slot: Arc<RwLock<Option<Arc<Context>>>>,
    previous: Option<Arc<Context>>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        *self.slot.write() = self.previous.take();
    }
}

impl<P: ContextProvider + ?Sized> ContextProvider for Arc<P> {
    fn current(&self) -> Result<Option<Arc<Context>>> {
        (**self).current()
    }
}
