//! Core logger types and traits

pub mod app_identity;
pub mod caller;
pub mod config;
pub mod context;
pub mod entry_builder;
pub mod error;
pub mod error_info;
pub mod events;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod properties;
pub mod sink;
pub mod thread_context;
pub mod timestamp;

pub use app_identity::AppIdentity;
pub use caller::{CallSite, CallSiteLocator, CallerFrame, CallerLocator};
pub use config::LoggerConfig;
pub use context::{
    ApplicationContextProvider, Context, ContextGuard, ContextProvider, SharedContextProvider,
    StaticContextProvider,
};
pub use entry_builder::EntryBuilder;
pub use error::{LoggerError, Result};
pub use error_info::ErrorInfo;
pub use events::{EntryWrittenHandler, ErrorHandler, ErrorReporter, SubscriptionId};
pub use log_entry::LogEntry;
pub use log_level::{LevelSet, LogLevel};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use properties::{keys, FieldValue, Properties, NULL_MARKER};
pub use sink::Sink;
pub use thread_context::ThreadContext;
pub use timestamp::TimestampFormat;
