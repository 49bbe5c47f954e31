//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A sink rejected or failed to persist an entry
    #[error("Sink '{sink}' failed: {message}")]
    Sink { sink: String, message: String },

    /// The ambient context could not be produced
    #[error("Context provider failed: {0}")]
    ContextProvider(String),

    /// Building the log entry failed (extra properties, caller lookup, ...)
    #[error("Entry enrichment failed: {0}")]
    Enrichment(String),

    /// An entry-written handler reported a failure
    #[error("Notification handler failed: {0}")]
    Handler(String),

    /// A panic was caught inside the write path
    #[error("Panic inside logging pipeline: {0}")]
    Panicked(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a sink error
    pub fn sink(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Sink {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create a context provider error
    pub fn context_provider<S: Into<String>>(msg: S) -> Self {
        LoggerError::ContextProvider(msg.into())
    }

    /// Create an enrichment error
    pub fn enrichment<S: Into<String>>(msg: S) -> Self {
        LoggerError::Enrichment(msg.into())
    }

    /// Create a handler error
    pub fn handler<S: Into<String>>(msg: S) -> Self {
        LoggerError::Handler(msg.into())
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Build an error from a payload caught by `catch_unwind`
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        LoggerError::Panicked(message)
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
