//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Aggregation (fan-out calls, duration, per-source slice sizes)
//! - Source degradation (failures that were replaced by empty pages)
//! - Filter storage (corrupted records dropped on read)
//! - External services (the remote trip API)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Aggregation Metrics
// =============================================================================

/// Unified listing requests served.
pub static LIST_ALL_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "marketplace_list_all_total",
        "Total unified listing requests",
    )
    .unwrap()
});

/// Wall time of one fan-out across all sources.
pub static FANOUT_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "marketplace_fanout_duration_seconds",
            "Duration of the source fan-out",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 15.0]),
    )
    .unwrap()
});

/// Items contributed per source per request.
pub static SOURCE_ITEMS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "marketplace_source_items",
            "Number of items returned per source slice",
        )
        .buckets(vec![0.0, 1.0, 2.0, 4.0, 8.0, 12.0, 24.0, 60.0]),
        &["kind"], // "property", "professional", "trip"
    )
    .unwrap()
});

/// Source failures degraded to an empty page.
pub static SOURCE_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "marketplace_source_failures_total",
            "Total source failures replaced by empty pages",
        ),
        &["kind"],
    )
    .unwrap()
});

// =============================================================================
// Filter Storage Metrics
// =============================================================================

/// Corrupted persisted records discarded on read.
pub static STORAGE_CORRUPTIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "marketplace_storage_corruptions_total",
            "Total corrupted filter records discarded",
        ),
        &["key"], // "record", "preset"
    )
    .unwrap()
});

// =============================================================================
// External Service Metrics
// =============================================================================

/// External service request duration.
pub static EXTERNAL_SERVICE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "marketplace_external_service_duration_seconds",
            "Duration of external service calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["service", "operation"],
    )
    .unwrap()
});

/// External service requests total.
pub static EXTERNAL_SERVICE_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "marketplace_external_service_requests_total",
            "Total external service requests",
        ),
        &["service", "operation", "status"], // status: "success", "error"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Aggregation
        Box::new(LIST_ALL_TOTAL.clone()),
        Box::new(FANOUT_DURATION.clone()),
        Box::new(SOURCE_ITEMS.clone()),
        Box::new(SOURCE_FAILURES.clone()),
        // Storage
        Box::new(STORAGE_CORRUPTIONS.clone()),
        // External services
        Box::new(EXTERNAL_SERVICE_DURATION.clone()),
        Box::new(EXTERNAL_SERVICE_REQUESTS.clone()),
    ]
}
