//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Redesign batches (per-order outcomes, batch kinds, durations)
//! - Export batches (files handed to the retriever or missing)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Redesign Metrics
// =============================================================================

/// Per-order outcomes of bulk redesign batches.
pub static BULK_OUTCOMES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "orderdesk_bulk_outcomes_total",
            "Total per-order outcomes of bulk redesign batches",
        ),
        &["outcome"], // "succeeded", "failed", "not_found", "ineligible_new", "already_in_target_state"
    )
    .unwrap()
});

/// Completed bulk batches by report kind.
pub static BULK_BATCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("orderdesk_bulk_batches_total", "Total bulk batches run"),
        &["kind"], // "success", "partial", "failure", "info", "export"
    )
    .unwrap()
});

/// Bulk batch duration in seconds.
pub static BULK_BATCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "orderdesk_bulk_batch_duration_seconds",
            "Duration of bulk batches",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["action"], // "redesign", "export"
    )
    .unwrap()
});

// =============================================================================
// Export Metrics
// =============================================================================

/// Export files by result.
pub static EXPORT_FILES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("orderdesk_export_files_total", "Total export files requested"),
        &["result"], // "downloaded", "missing"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Redesign
        Box::new(BULK_OUTCOMES.clone()),
        Box::new(BULK_BATCHES.clone()),
        Box::new(BULK_BATCH_DURATION.clone()),
        // Export
        Box::new(EXPORT_FILES.clone()),
    ]
}
