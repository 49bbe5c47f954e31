//! Caller location lookup
//!
//! Every public logging method is `#[track_caller]`, so the location of
//! the user's call is available without walking the stack. The logging
//! macros additionally record the module and the enclosing function.

use serde::{Deserialize, Serialize};
use std::panic::Location;

/// Placeholder for any caller field that could not be determined
pub const UNKNOWN: &str = "unknown";

/// Raw information captured at the point of a log call
#[derive(Debug, Clone, Copy)]
pub struct CallSite {
    pub location: &'static Location<'static>,
    pub module_path: Option<&'static str>,
    pub function_path: Option<&'static str>,
}

impl CallSite {
    /// Capture the location of the caller
    #[track_caller]
    #[inline]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }

    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            location,
            module_path: None,
            function_path: None,
        }
    }

    /// Used by the logging macros
    pub fn new(
        location: &'static Location<'static>,
        module_path: &'static str,
        function_path: &'static str,
    ) -> Self {
        Self {
            location,
            module_path: Some(module_path),
            function_path: Some(function_path),
        }
    }
}

/// Resolved caller fields written to `calling*` entry properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerFrame {
    pub class_name: String,
    pub method_name: String,
    pub file_name: String,
    pub line_number: u32,
}

impl Default for CallerFrame {
    fn default() -> Self {
        Self {
            class_name: UNKNOWN.to_string(),
            method_name: UNKNOWN.to_string(),
            file_name: UNKNOWN.to_string(),
            line_number: 0,
        }
    }
}

/// Turns a captured call site into caller fields
///
/// Implementations must not fail; any field they cannot determine stays
/// at its `unknown`/`0` default.
pub trait CallerLocator: Send + Sync {
    fn locate(&self, site: &CallSite) -> CallerFrame;
}

/// Default locator
///
/// `crate::orders::Checkout::submit` becomes class
/// `crate::orders::Checkout` and method `submit`. Closure segments are
/// skipped. Without a function path the module path is used as the class.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallSiteLocator;

impl CallSiteLocator {
    fn split_function_path(path: &str) -> Option<(&str, &str)> {
        let mut trimmed = path;
        while let Some(rest) = trimmed.strip_suffix("::{{closure}}") {
            trimmed = rest;
        }
        let (class, method) = trimmed.rsplit_once("::")?;
        if class.is_empty() || method.is_empty() {
            return None;
        }
        Some((class, method))
    }
}

impl CallerLocator for CallSiteLocator {
    fn locate(&self, site: &CallSite) -> CallerFrame {
        let mut frame = CallerFrame::default();

        let file = site.location.file();
        if !file.is_empty() {
            frame.file_name = file.to_string();
        }
        frame.line_number = site.location.line();

        match site.function_path.and_then(Self::split_function_path) {
            Some((class, method)) => {
                frame.class_name = class.to_string();
                frame.method_name = method.to_string();
            }
            None => {
                if let Some(module) = site.module_path {
                    frame.class_name = module.to_string();
                }
            }
        }

        frame
    }
}
