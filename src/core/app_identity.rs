//! Identity of the host application, written to every entry's context

use super::caller::UNKNOWN;
use serde::{Deserialize, Serialize};

/// Process-constant application metadata
///
/// Use [`app_identity!`](crate::app_identity) from the application crate
/// to fill it from that crate's Cargo manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppIdentity {
    pub company: String,
    pub version: String,
    pub file_version: String,
    pub title: String,
    pub description: String,
}

impl AppIdentity {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        let version = version.into();
        Self {
            title: title.into(),
            file_version: version.clone(),
            version,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_file_version(mut self, file_version: impl Into<String>) -> Self {
        self.file_version = file_version.into();
        self
    }
}

impl Default for AppIdentity {
    fn default() -> Self {
        Self {
            company: UNKNOWN.to_string(),
            version: UNKNOWN.to_string(),
            file_version: UNKNOWN.to_string(),
            title: UNKNOWN.to_string(),
            description: UNKNOWN.to_string(),
        }
    }
}

/// Build an [`AppIdentity`](crate::AppIdentity) from the calling crate's
/// Cargo metadata
///
/// `authors` become the company, `name` the title.
///
/// ```
/// let identity = rust_structured_logger::app_identity!();
/// assert_eq!(identity.title, "rust_structured_logger");
/// ```
#[macro_export]
macro_rules! app_identity {
    () => {
        $crate::AppIdentity {
            company: env!("CARGO_PKG_AUTHORS").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            file_version: env!("CARGO_PKG_VERSION").to_string(),
            title: env!("CARGO_PKG_NAME").to_string(),
            description: env!("CARGO_PKG_DESCRIPTION").to_string(),
        }
    };
}
