//! HTTP middleware for the API server.
//!
//! This module provides middleware functions and layers for:
//! - Request ID generation and propagation
//! - Request logging with timing
//! - Request body size limits

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};

/// Request ID header name.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Monotonic fallback counter for requests arriving without an ID.
static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Request ID extension type.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Middleware to add a request ID to requests and responses.
///
/// An inbound `X-Request-Id` header is propagated unchanged; otherwise a
/// process-local sequential ID is assigned.
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap_or_else(|| format!("hw-{}", REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed)));

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Middleware for request logging.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_server_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            duration_ms = duration.as_millis() as u64,
            "Request completed with error"
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            duration_ms = duration.as_millis() as u64,
            "Request completed"
        );
    }

    response
}

/// Default request body size limit (10 MB).
pub const DEFAULT_REQUEST_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Creates a request body size limit layer.
///
/// The limit can be configured via the `HW_REQUEST_BODY_LIMIT` environment
/// variable (in bytes). Defaults to 10 MB.
pub fn request_body_limit_layer() -> RequestBodyLimitLayer {
    let limit = std::env::var("HW_REQUEST_BODY_LIMIT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_REQUEST_BODY_LIMIT);

    RequestBodyLimitLayer::new(limit)
}
