//! Criterion benchmarks for rust_structured_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_structured_logger::layout::{JsonLayout, PropertyBag};
use rust_structured_logger::prelude::*;
use rust_structured_logger::info;
use std::sync::Arc;

fn bench_logger() -> Logger {
    Logger::builder()
        .context_provider(StaticContextProvider::new(
            Context::new("bench").with_property("tenant", "t-1"),
        ))
        .app_identity(AppIdentity::new("bench", "1.0.0"))
        .error_reporter(ErrorReporter::new())
        .build()
}

// ============================================================================
// Level Filter Benchmarks
// ============================================================================

fn bench_filtered(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered");
    group.throughput(Throughput::Elements(1));

    let logger = bench_logger();
    logger.set_levels_handled(LevelSet::at_least(LogLevel::Error));

    group.bench_function("debug_method", |b| {
        b.iter(|| {
            logger.debug(black_box("Debug message"));
        });
    });

    group.bench_function("debug_macro_with_props", |b| {
        b.iter(|| {
            rust_structured_logger::debug!(logger, { "k" => 1 }, "value {}", black_box(42));
        });
    });

    group.finish();
}

// ============================================================================
// Enrichment Benchmarks
// ============================================================================

fn bench_enriched(c: &mut Criterion) {
    let mut group = c.benchmark_group("enriched");
    group.throughput(Throughput::Elements(1));

    let logger = bench_logger();

    group.bench_function("info", |b| {
        b.iter(|| {
            logger.info(black_box("Info message"));
        });
    });

    let props = Properties::new()
        .with_field("orderId", 17)
        .with_field("amount", 12.5)
        .with_field("currency", "EUR");
    group.bench_function("info_with_props", |b| {
        b.iter(|| {
            logger.info_with_props(black_box("Order placed"), &props);
        });
    });

    group.bench_function("macro", |b| {
        b.iter(|| {
            info!(logger, { "orderId" => 17 }, "Order {} placed", black_box(17));
        });
    });

    let exception = ErrorInfo::new("timeout").with_data("attempt", 3);
    group.bench_function("error_with_exception", |b| {
        b.iter(|| {
            logger.error(black_box("Call failed"), exception.clone());
        });
    });

    group.finish();
}

// ============================================================================
// Concurrent Logging Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    let logger = Arc::new(bench_logger());

    group.bench_function("multi_thread_4", |b| {
        let logger = Arc::clone(&logger);
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let logger = Arc::clone(&logger);
                    std::thread::spawn(move || {
                        logger.info(black_box("Concurrent message"));
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
}

// ============================================================================
// Layout Benchmarks
// ============================================================================

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    group.throughput(Throughput::Elements(1));

    let bag: PropertyBag = (0..20)
        .map(|i| (format!("key{}", i), format!("value{}", i)))
        .chain([
            ("message".to_string(), "m".to_string()),
            ("loglevel".to_string(), "Info".to_string()),
            ("timestamp".to_string(), "2025-01-08T10:30:45.123Z".to_string()),
        ])
        .collect();
    let layout = JsonLayout::new();

    group.bench_function("format", |b| {
        b.iter(|| {
            let line = layout.format(black_box(&bag)).unwrap();
            black_box(line)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_filtered,
    bench_enriched,
    bench_concurrent_logging,
    bench_layout
);
criterion_main!(benches);
