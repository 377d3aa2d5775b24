//! Request logging middleware
//!
//! One line per request: id, route, status, latency and, for rejected
//! calculations, the error code the engine answered with.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use shared::error::ErrorCode;
use tracing::{debug, info, warn};

/// Liveness probes are logged at debug only
const HEALTH_PATH: &str = "/health";

/// Request logging middleware
///
/// Runs inside the request id layer, so `x-request-id` is set by the time
/// it sees the request. Error responses built from `AppError` carry their
/// [`ErrorCode`] as a response extension.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let response = next.run(req).await;

    let latency_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();

    match response.extensions().get::<ErrorCode>() {
        Some(code) => warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            code = code.code(),
            category = ?code.category(),
            latency_ms = %latency_ms,
            "Request rejected: {}",
            code.message()
        ),
        // Rejections from tower layers (timeout, body limit) carry no code
        None if status >= 400 => warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms = %latency_ms,
            "Request failed"
        ),
        None if path == HEALTH_PATH => debug!(
            request_id = %request_id,
            status,
            latency_ms = %latency_ms,
            "Health check"
        ),
        None => info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms = %latency_ms,
            "Request completed"
        ),
    }

    response
}
