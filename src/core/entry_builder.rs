//! Enrichment of a log call into a [`LogEntry`]

use super::{
    app_identity::AppIdentity,
    caller::{CallSite, CallerLocator, UNKNOWN},
    context::ContextProvider,
    error::Result,
    error_info::ErrorInfo,
    log_entry::LogEntry,
    log_level::LogLevel,
    properties::{keys, Properties},
    timestamp::TimestampFormat,
};
use std::sync::Arc;

/// Builds fully populated entries
///
/// Machine name, process id and application identity are resolved once
/// when the builder is created; caller location and context are resolved
/// per entry.
pub struct EntryBuilder {
    context_provider: Arc<dyn ContextProvider>,
    caller_locator: Arc<dyn CallerLocator>,
    app_identity: AppIdentity,
    timestamp_format: TimestampFormat,
    machine_name: String,
    process_id: String,
}

impl EntryBuilder {
    pub fn new(
        context_provider: Arc<dyn ContextProvider>,
        caller_locator: Arc<dyn CallerLocator>,
        app_identity: AppIdentity,
        timestamp_format: TimestampFormat,
    ) -> Self {
        Self {
            context_provider,
            caller_locator,
            app_identity,
            timestamp_format,
            machine_name: machine_name(),
            process_id: std::process::id().to_string(),
        }
    }

    /// Produce the entry for one log call
    ///
    /// # Errors
    ///
    /// Only the context provider can fail here.
    pub fn build(
        &self,
        level: LogLevel,
        message: String,
        exception: Option<ErrorInfo>,
        extra: Option<&Properties>,
        site: &CallSite,
    ) -> Result<LogEntry> {
        let mut entry = LogEntry::new(level, message);

        let entry_props = &mut entry.entry_properties;
        entry_props.insert(
            keys::TIMESTAMP.to_string(),
            self.timestamp_format.format(&entry.timestamp),
        );
        entry_props.insert(keys::LOG_LEVEL.to_string(), level.to_string());
        entry_props.insert(keys::MESSAGE.to_string(), entry.message.clone());

        if let Some(exception) = &exception {
            entry_props.insert(keys::EXCEPTION.to_string(), exception.to_string());
            for (key, value) in exception.data.iter().filter(|(_, v)| !v.is_null()) {
                entry_props.insert(
                    format!("{}{}", keys::EXCEPTION_DATA_PREFIX, key),
                    value.to_string(),
                );
            }
        }
        entry.exception = exception;

        if let Some(extra) = extra {
            for (key, value) in extra.iter() {
                entry
                    .entry_properties
                    .insert(key.clone(), value.to_string());
            }
        }

        let context_props = &mut entry.context_properties;
        context_props.insert(keys::HOST.to_string(), self.machine_name.clone());
        context_props.insert(keys::PROCESS_ID.to_string(), self.process_id.clone());

        self.add_caller_properties(&mut entry, site);
        self.add_identity_properties(&mut entry);

        if let Some(context) = self.context_provider.current()? {
            entry.username = Some(context.username.clone());
            entry
                .context_properties
                .insert(keys::USERNAME.to_string(), context.username.clone());
            for (key, value) in &context.other_properties {
                entry.context_properties.insert(key.clone(), value.clone());
            }
        }

        Ok(entry)
    }

    fn add_caller_properties(&self, entry: &mut LogEntry, site: &CallSite) {
        let frame = self.caller_locator.locate(site);
        let props = &mut entry.entry_properties;
        props.insert(keys::CALLING_CLASS_NAME.to_string(), frame.class_name);
        props.insert(keys::CALLING_METHOD_NAME.to_string(), frame.method_name);
        props.insert(keys::CALLING_FILE_NAME.to_string(), frame.file_name);
        props.insert(
            keys::CALLING_LINE_NUMBER.to_string(),
            frame.line_number.to_string(),
        );
    }

    fn add_identity_properties(&self, entry: &mut LogEntry) {
        let identity = &self.app_identity;
        let props = &mut entry.context_properties;
        props.insert(keys::ASSEMBLY_COMPANY.to_string(), identity.company.clone());
        props.insert(keys::ASSEMBLY_VERSION.to_string(), identity.version.clone());
        props.insert(
            keys::ASSEMBLY_FILE_VERSION.to_string(),
            identity.file_version.clone(),
        );
        props.insert(keys::ASSEMBLY_TITLE.to_string(), identity.title.clone());
        props.insert(
            keys::ASSEMBLY_DESCRIPTION.to_string(),
            identity.description.clone(),
        );
    }
}

/// Best-effort machine name: `HOSTNAME`/`COMPUTERNAME`, then `/etc/hostname`
fn machine_name() -> String {
    std::env::var("HOSTNAME")
        .or_else(|_| std::env::var("COMPUTERNAME"))
        .ok()
        .or_else(|| std::fs::read_to_string("/etc/hostname").ok())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}
