//! Per-route HTTP metrics
//!
//! Only requests that matched a route are recorded, and scrapes of
//! [`METRICS_PATH`] are skipped so polling does not show up in the numbers.
//! Series are keyed by the route template, never the raw URI.

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use super::handlers::METRICS_PATH;

pub async fn http_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let route = match request.extensions().get::<MatchedPath>() {
        Some(matched) if matched.as_str() != METRICS_PATH => matched.as_str().to_owned(),
        _ => return next.run(request).await,
    };
    let method = request.method().as_str().to_owned();

    let in_flight = metrics::gauge!("http_requests_in_flight");
    in_flight.increment(1.0);
    let started = Instant::now();
    let response = next.run(request).await;
    in_flight.decrement(1.0);

    metrics::histogram!("http_request_duration_seconds", "method" => method.clone(), "path" => route.clone())
        .record(started.elapsed().as_secs_f64());
    metrics::counter!(
        "http_requests_total",
        "method" => method,
        "path" => route,
        "status" => status_class(response.status())
    )
    .increment(1);

    response
}

/// `"2xx"`, `"4xx"` and so on.
fn status_class(status: StatusCode) -> &'static str {
    match status.as_u16() {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        _ => "5xx",
    }
}
