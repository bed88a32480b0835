//! Request metrics for the dashboard API.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::warn;

use crate::metrics::{
    normalize_path, HTTP_REQUESTS_IN_FLIGHT, HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION,
};

/// Path of the scrape endpoint; scrapes are not counted as API traffic.
const METRICS_PATH: &str = "/metrics";

/// Records duration, count and in-flight gauge per normalized route.
///
/// Server errors are also logged with the route label so a failing bulk
/// endpoint shows up without scraping.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    if request.uri().path() == METRICS_PATH {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let route = normalize_path(request.uri().path());
    let started = Instant::now();

    HTTP_REQUESTS_IN_FLIGHT.inc();
    let response = next.run(request).await;
    HTTP_REQUESTS_IN_FLIGHT.dec();

    let status = response.status();
    let labels = [method.as_str(), route.as_str(), status.as_str()];
    HTTP_REQUEST_DURATION
        .with_label_values(&labels)
        .observe(started.elapsed().as_secs_f64());
    HTTP_REQUESTS_TOTAL.with_label_values(&labels).inc();

    if status.is_server_error() {
        warn!(%method, %route, status = status.as_u16(), "Request failed");
    }

    response
}
