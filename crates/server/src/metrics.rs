//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the orderdesk server:
//! - HTTP request metrics (latency, counts, errors)
//! - Dashboard state (loaded orders, selection size, submission latch)
//! - Core bulk metrics registered from `orderdesk_core::metrics`

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "orderdesk_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("orderdesk_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "orderdesk_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Dashboard Metrics (collected dynamically)
// =============================================================================

/// Orders currently loaded.
pub static ORDERS_LOADED: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("orderdesk_orders_loaded", "Number of orders currently loaded").unwrap()
});

/// Orders currently selected.
pub static ORDERS_SELECTED: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "orderdesk_orders_selected",
        "Number of orders currently selected",
    )
    .unwrap()
});

/// Redesign submission in flight (1) or idle (0).
pub static SUBMISSION_IN_PROGRESS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "orderdesk_submission_in_progress",
        "Whether a redesign batch is being submitted (1) or not (0)",
    )
    .unwrap()
});

/// Order reloads that failed.
pub static RELOAD_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "orderdesk_reload_failures_total",
        "Total order reloads that failed",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Dashboard
    registry.register(Box::new(ORDERS_LOADED.clone())).unwrap();
    registry
        .register(Box::new(ORDERS_SELECTED.clone()))
        .unwrap();
    registry
        .register(Box::new(SUBMISSION_IN_PROGRESS.clone()))
        .unwrap();
    registry
        .register(Box::new(RELOAD_FAILURES_TOTAL.clone()))
        .unwrap();

    // Core metrics (bulk redesign and export)
    for metric in orderdesk_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Collect dynamic metrics from current application state.
///
/// This is called before encoding metrics to update gauges with current values
/// from the dashboard session.
pub async fn collect_dynamic_metrics(state: &crate::state::AppState) {
    let dashboard = state.dashboard().read().await;
    ORDERS_LOADED.set(dashboard.rows().len() as i64);
    ORDERS_SELECTED.set(dashboard.selection().len() as i64);
    SUBMISSION_IN_PROGRESS.set(i64::from(dashboard.is_submitting()));
}

static UUID_RE: Lazy<regex_lite::Regex> = Lazy::new(|| {
    regex_lite::Regex::new(
        r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
    )
    .unwrap()
});

static SELECTION_ID_RE: Lazy<regex_lite::Regex> =
    Lazy::new(|| regex_lite::Regex::new(r"/selection/[^/]+/toggle$").unwrap());

static SORT_KEY_RE: Lazy<regex_lite::Regex> =
    Lazy::new(|| regex_lite::Regex::new(r"/orders/sort/[^/]+$").unwrap());

static NUMERIC_RE: Lazy<regex_lite::Regex> =
    Lazy::new(|| regex_lite::Regex::new(r"/\d+(/|$)").unwrap());

/// Normalize a path for metric labels (replace IDs with placeholders).
pub fn normalize_path(path: &str) -> String {
    let result = UUID_RE.replace_all(path, "{id}");
    let result = SELECTION_ID_RE.replace_all(&result, "/selection/{id}/toggle");
    let result = SORT_KEY_RE.replace_all(&result, "/orders/sort/{key}");
    let result = NUMERIC_RE.replace_all(&result, "/{id}$1");
    result.to_string()
}
