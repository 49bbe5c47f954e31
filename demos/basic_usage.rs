//! Basic logger usage example
//!
//! Demonstrates console output, the handled-level set, extra properties
//! and error notifications.
//!
//! Run with: cargo run --example basic_usage

use rust_structured_logger::prelude::*;
use rust_structured_logger::{info, warn};

fn main() -> Result<()> {
    println!("=== Rust Structured Logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .name("basic")
        .sink(ConsoleSink::new().with_properties(true))
        .app_identity(rust_structured_logger::app_identity!())
        .build();

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message", None);
    logger.fatal("This is a fatal message", None);

    println!("\n2. Restricting handled levels:");
    logger.set_levels_handled(LevelSet::at_least(LogLevel::Info));
    println!("   Debug is no longer handled:");
    logger.debug("Debug message (hidden)");
    logger.info("Info message (visible)");

    println!("\n3. Extra properties:");
    let props = Properties::new()
        .with_field("orderId", 1042)
        .with_field("customer", "c-77");
    logger.info_with_props("Order accepted", &props);
    info!(logger, { "port" => 8080 }, "Listening on port {}", 8080);

    println!("\n4. Errors with data:");
    let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "upstream timed out");
    logger.error(
        "Payment call failed",
        ErrorInfo::from_error(&io).with_data("attempt", 3),
    );

    println!("\n5. Failure notifications:");
    let reporter = ErrorReporter::new();
    reporter.subscribe(|source, err| {
        println!("   [{}] logging failure observed: {}", source.name(), err);
    });
    let fragile = Logger::builder()
        .name("fragile")
        .sink(JsonFileSink::new(std::env::temp_dir().join("basic_usage_demo.jsonl"))?)
        .context_provider(FailingProvider)
        .error_reporter(reporter)
        .build();
    warn!(fragile, "this entry cannot be built");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

struct FailingProvider;

impl ContextProvider for FailingProvider {
    fn current(&self) -> Result<Option<std::sync::Arc<Context>>> {
        Err(LoggerError::context_provider("session store offline"))
    }
}
