//! Prometheus scrape endpoint and per-route HTTP metrics

pub mod handlers;
pub mod middleware;

pub use handlers::{describe_metrics, metrics_routes, METRICS_PATH};
pub use middleware::http_metrics_middleware;
