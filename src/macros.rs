//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. Unlike the
//! `Logger` methods they also record the module and enclosing function, so
//! `callingClassName`/`callingMethodName` are filled in.
//!
//! Extra properties go in a braced block before the message, and an error
//! can be attached with `exception = ...`:
//!
//! ```
//! use rust_structured_logger::prelude::*;
//! use rust_structured_logger::{error, info};
//!
//! let logger = Logger::builder().build();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, { "port" => port }, "Server listening on port {}", port);
//!
//! let cause = ErrorInfo::new("connection refused").with_data("attempt", 3);
//! error!(logger, exception = cause, { "db" => "orders" }, "Query failed");
//! ```

/// Capture the current call site, including module and function path
#[doc(hidden)]
#[macro_export]
macro_rules! __call_site {
    () => {{
        fn __f() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let __name = __type_name_of(__f);
        $crate::CallSite::new(
            ::std::panic::Location::caller(),
            ::std::module_path!(),
            __name.strip_suffix("::__f").unwrap_or(__name),
        )
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_impl {
    ($logger:expr, $level:expr, $exception:expr, { $($key:expr => $value:expr),* $(,)? }, $($arg:tt)+) => {{
        let __logger = &$logger;
        let __level: $crate::LogLevel = $level;
        let __props = if __logger.should_log(__level) {
            ::std::option::Option::Some($crate::Properties::new()$(.with_field($key, $value))*)
        } else {
            ::std::option::Option::None
        };
        __logger.log_fmt(
            $crate::__call_site!(),
            __level,
            $exception,
            __props.as_ref(),
            ::std::format_args!($($arg)+),
        )
    }};
    ($logger:expr, $level:expr, $exception:expr, $($arg:tt)+) => {
        $logger.log_fmt(
            $crate::__call_site!(),
            $level,
            $exception,
            ::std::option::Option::None,
            ::std::format_args!($($arg)+),
        )
    };
}

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use rust_structured_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use rust_structured_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// log!(logger, LogLevel::Warn, { "retry" => 2 }, "Retrying");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, exception = $exc:expr, { $($props:tt)* }, $($arg:tt)+) => {
        $crate::__log_impl!($logger, $level, ::std::option::Option::Some($exc), { $($props)* }, $($arg)+)
    };
    ($logger:expr, $level:expr, exception = $exc:expr, $($arg:tt)+) => {
        $crate::__log_impl!($logger, $level, ::std::option::Option::Some($exc), $($arg)+)
    };
    ($logger:expr, $level:expr, { $($props:tt)* }, $($arg:tt)+) => {
        $crate::__log_impl!($logger, $level, ::std::option::Option::None, { $($props)* }, $($arg)+)
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::__log_impl!($logger, $level, ::std::option::Option::None, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_structured_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use rust_structured_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_structured_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use rust_structured_logger::info;
/// info!(logger, "Application started");
/// info!(logger, { "items" => 100 }, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_structured_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use rust_structured_logger::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_structured_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use rust_structured_logger::error;
/// error!(logger, "Failed to connect to database");
///
/// let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "read timed out");
/// error!(logger, exception = ErrorInfo::from_error(&io), "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// # Examples
///
/// ```
/// # use rust_structured_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use rust_structured_logger::fatal;
/// fatal!(logger, "Critical system failure");
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
