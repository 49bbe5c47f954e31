//! `log` facade interop example
//!
//! Installs an ordered-JSON `log` backend globally and forwards entries to
//! it. A plain `log::info!` call from "third-party" code on the same thread
//! picks up the context mirrored by the sink.
//!
//! Run with: cargo run --example backend_logging

use rust_structured_logger::layout::JsonLogWriter;
use rust_structured_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust Structured Logger - Backend Logging Example ===\n");

    log::set_boxed_logger(Box::new(JsonLogWriter::new(std::io::stdout())))
        .map_err(|e| LoggerError::config("log backend", e.to_string()))?;
    log::set_max_level(log::LevelFilter::Debug);

    let logger = Logger::builder()
        .name("backend-demo")
        .sink(LogBackendSink::global("backend-demo"))
        .context_provider(StaticContextProvider::new(
            Context::new("svc-account").with_property("tenant", "acme"),
        ))
        .build();

    logger.info_with_props(
        "Invoice created",
        &Properties::new().with_field("invoiceId", "inv-9"),
    );
    logger.fatal("Ledger unavailable", ErrorInfo::new("connection refused"));

    third_party_code();

    log::logger().flush();
    println!("\n=== Example completed successfully! ===");

    Ok(())
}

fn third_party_code() {
    log::info!(target: "vendor", "vendor library did some work");
}
