//! `/metrics` scrape endpoint and the account metric catalogue

use axum::{extract::State, http::header, response::IntoResponse, routing::get, Router};
use metrics::{describe_counter, describe_gauge, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusHandle;

/// Path Prometheus scrapes
pub const METRICS_PATH: &str = "/metrics";

const PROMETHEUS_TEXT: &str = "text/plain; version=0.0.4; charset=utf-8";

#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// Route serving the text exposition of `handle`.
pub fn metrics_routes(handle: PrometheusHandle) -> Router {
    Router::new()
        .route(METRICS_PATH, get(scrape))
        .with_state(MetricsState { handle })
}

async fn scrape(State(state): State<MetricsState>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, PROMETHEUS_TEXT)], state.handle.render())
}

/// Register HELP text for every metric this service emits. Call once,
/// after the recorder is installed.
pub fn describe_metrics() {
    describe_counter!(
        "accounts_created_total",
        "Accounts created, labelled by role"
    );
    describe_counter!("accounts_deleted_total", "Accounts deleted");
    describe_counter!(
        "http_requests_total",
        "Routed HTTP requests by method, route and status class"
    );
    describe_histogram!(
        "http_request_duration_seconds",
        Unit::Seconds,
        "Routed HTTP request latency by method and route"
    );
    describe_gauge!("http_requests_in_flight", "Routed HTTP requests being handled");
}
