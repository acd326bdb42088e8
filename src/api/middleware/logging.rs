//! Logging middleware for request/response tracing.
//!
//! This middleware logs incoming requests and outgoing responses with
//! timing information and request correlation via request IDs.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Instrument, Level, info, span, warn};

use super::RequestId;

const UNKNOWN_REQUEST_ID: &str = "unknown";

/// Middleware that logs request and response information.
///
/// # Logged Information
/// - Request: HTTP method, path, request ID
/// - Response: status code, duration in milliseconds, request ID
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request_id_of(&request);

    let span = span!(
        Level::INFO,
        "http_request",
        method = %method,
        uri = %uri,
        request_id = %request_id
    );

    async move {
        info!(method = %method, path = %uri.path(), "Request received");

        let start = Instant::now();
        let response = next.run(request).await;
        let duration = start.elapsed();

        let status = response.status().as_u16();
        if response.status().is_server_error() {
            warn!(status, duration_ms = %duration.as_millis(), "Response sent");
        } else {
            info!(status, duration_ms = %duration.as_millis(), "Response sent");
        }

        response
    }
    .instrument(span)
    .await
}

fn request_id_of(request: &Request) -> String {
    request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| UNKNOWN_REQUEST_ID.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_request_id_default_value() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        assert_eq!(request_id_of(&request), UNKNOWN_REQUEST_ID);
    }

    #[test]
    fn test_request_id_from_extensions() {
        let mut request = Request::builder().uri("/").body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(RequestId("req-1".to_string()));
        assert_eq!(request_id_of(&request), "req-1");
    }
}
