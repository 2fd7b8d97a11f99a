//! Metrics collection and exposition.
//!
//! # Metrics
//! - `httpbin_requests_total` (counter): requests by method, route, status
//! - `httpbin_request_duration_seconds` (histogram): latency by method, route
//!
//! Without an installed exporter every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Route label used when no route template matched.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Install the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    metrics::counter!(
        "httpbin_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "httpbin_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// The route template a request matched, or [`UNMATCHED_ROUTE`].
///
/// Templates keep label cardinality bounded: `/status/418` and
/// `/status/500` both report `/status/{code}`.
pub fn route_label<B>(request: &Request<B>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

/// Middleware recording request counts and latency per route template.
pub async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = route_label(&request);

    let response = next.run(request).await;
    record_request(&method, &route, response.status().as_u16(), start);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use tower::ServiceExt;

    async fn label_for(uri: &str) -> String {
        async fn label(request: Request<Body>) -> String {
            route_label(&request)
        }
        let router = Router::new()
            .route("/status/{code}", get(label))
            .fallback(label);

        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_route_label_uses_template() {
        assert_eq!(label_for("/status/418").await, "/status/{code}");
        assert_eq!(label_for("/status/500").await, "/status/{code}");
    }

    #[tokio::test]
    async fn test_route_label_for_fallback() {
        assert_eq!(label_for("/no/such/route").await, UNMATCHED_ROUTE);
    }

    #[test]
    fn test_record_request_without_exporter() {
        record_request("GET", "/get", 200, Instant::now());
    }
}
