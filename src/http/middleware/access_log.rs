//! Access log middleware.
//! One structured line per request, at error level when a handler attached an error.

use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};

use crate::http::request::request_id_of;
use crate::http::response::RecordedError;
use crate::observability::metrics;

pub async fn access_log(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let request_id = request_id_of(&req).to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    metrics::record_request(method.as_str(), status, start);

    match response.extensions().get::<RecordedError>() {
        Some(err) => tracing::error!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms,
            error = %err.message(),
            "Request failed"
        ),
        None => tracing::info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms,
            "Request completed"
        ),
    }

    response
}
