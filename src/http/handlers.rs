//! Request handlers.

use std::any::Any;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::http::response::{ApiError, RecordedError};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::RouteDecision;

/// Liveness probe. Independent of the route cache.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Pick a random route key from the cached list.
pub async fn decide(State(state): State<AppState>) -> Result<Json<RouteDecision>, ApiError> {
    let routes = state.cache.get();
    let decision = state.selector.pick(&routes)?;

    tracing::debug!(decision = %decision.decision, candidates = routes.len(), "Route picked");
    metrics::record_decision();
    Ok(Json(decision))
}

/// Anything not routed, including unsupported methods on known paths.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Response for a handler that panicked: empty 500, panic message kept for the access log.
pub fn panicked(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
    response
        .extensions_mut()
        .insert(RecordedError(format!("panic: {message}")));
    response
}
