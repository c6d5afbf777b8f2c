//! Error responses.
//!
//! Handler errors become bare status codes for the client. The error itself
//! travels on the response as a [`RecordedError`] extension so the access
//! log can record it.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::observability::metrics;
use crate::routing::SelectionError;

/// Error attached to a response for the access log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedError(pub String);

impl RecordedError {
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Error returned by request handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Selection(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Selection(_) => metrics::record_selection_error(),
        }

        let mut response = self.status().into_response();
        response
            .extensions_mut()
            .insert(RecordedError(self.to_string()));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_is_500_with_recorded_error() {
        let response = ApiError::from(SelectionError::Empty).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let recorded = response.extensions().get::<RecordedError>().unwrap();
        assert_eq!(recorded.message(), "no route list found");
    }
}
