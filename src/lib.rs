//! # Rust Structured Logger
//!
//! A synchronous structured-logging layer: every log call is enriched with
//! timestamp, machine, process, caller location, application identity and
//! ambient user context, then handed to a pluggable [`Sink`].
//!
//! ## Features
//!
//! - **Level filtering first**: disabled levels cost one atomic load
//! - **Two property scopes**: entry properties win over context properties
//! - **Exception isolation**: a broken sink never reaches the caller
//! - **`log` interop**: forward entries to any `log` backend, render them as
//!   ordered JSON lines
//!
//! ```
//! use rust_structured_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(CollectingSink::new());
//! let logger = Logger::builder()
//!     .sink(sink.clone())
//!     .app_identity(rust_structured_logger::app_identity!())
//!     .build();
//!
//! logger.info_with_props("order placed", &Properties::new().with_field("orderId", 17));
//!
//! let entries = sink.entries();
//! let entry = &entries[0];
//! assert_eq!(entry.entry_properties["orderId"], "17");
//! assert_eq!(entry.context_properties["assemblyTitle"], "rust_structured_logger");
//! ```

pub mod core;
pub mod layout;
pub mod macros;
pub mod sinks;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::sinks::ConsoleSink;
    pub use crate::sinks::{AggregateSink, CollectingSink, JsonFileSink, LogBackendSink, NullSink};
    pub use crate::core::{
        AppIdentity, ApplicationContextProvider, CallSite, CallSiteLocator, CallerFrame,
        CallerLocator, Context, ContextGuard, ContextProvider, ErrorInfo, ErrorReporter,
        FieldValue, LevelSet, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, LoggerMetrics, Properties, Result, SharedContextProvider, Sink,
        StaticContextProvider, SubscriptionId, ThreadContext, TimestampFormat,
    };
}

pub use core::{
    keys, AppIdentity, ApplicationContextProvider, CallSite, CallSiteLocator, CallerFrame,
    CallerLocator, Context, ContextGuard, ContextProvider, EntryBuilder, EntryWrittenHandler,
    ErrorHandler, ErrorInfo, ErrorReporter, FieldValue, LevelSet, LogEntry, LogLevel, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Properties, Result,
    SharedContextProvider, Sink, StaticContextProvider, SubscriptionId, ThreadContext,
    TimestampFormat, NULL_MARKER,
};
pub use layout::{JsonLayout, JsonLogWriter, PropertyBag};
