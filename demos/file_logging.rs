//! JSON file logging example
//!
//! Writes entries as ordered JSON lines and prints the file back.
//!
//! Run with: cargo run --example file_logging

use rust_structured_logger::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Structured Logger - File Logging Example ===\n");

    let path = std::env::temp_dir().join("structured_logger_demo.jsonl");
    let _ = std::fs::remove_file(&path);

    let requests = Arc::new(SharedContextProvider::with_context(Context::new("system")));
    let logger = Logger::builder()
        .name("file-demo")
        .sink(JsonFileSink::new(&path)?)
        .context_provider(Arc::clone(&requests))
        .app_identity(AppIdentity::new("file_logging", "0.1.0").with_company("Demo Co"))
        .timestamp_format(TimestampFormat::Iso8601Micros)
        .build();

    logger.info("Service starting");

    for request_id in 1..=3 {
        let _scope = requests.scope(
            Context::new(format!("user-{}", request_id))
                .with_property("requestId", format!("req-{}", request_id)),
        );
        logger.info_with_props(
            "Handling request",
            &Properties::new().with_field("path", "/orders"),
        );
    }

    logger.warn("Service stopping");
    logger.flush()?;

    println!("Log file: {}\n", path.display());
    for line in std::fs::read_to_string(&path)?.lines() {
        println!("{}", line);
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
