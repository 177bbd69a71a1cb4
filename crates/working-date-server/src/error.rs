//! Errors surfaced to API and CLI callers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use working_date_engine::WorkingDateError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidParameters(String),

    #[error("the working date could not be computed")]
    Internal(WorkingDateError),
}

impl From<WorkingDateError> for ApiError {
    fn from(err: WorkingDateError) -> Self {
        match err {
            WorkingDateError::Overflow(_) => {
                ApiError::invalid("the requested duration is out of the supported date range")
            }
            other => ApiError::Internal(other),
        }
    }
}

/// JSON body of an error response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::InvalidParameters(message.into())
    }

    /// Machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidParameters(_) => "InvalidParameters",
            ApiError::Internal(_) => "InternalError",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidParameters(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// The body sent to the caller. Internal details stay in the logs.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(source) => tracing::error!(error = %source, "computation failed"),
            ApiError::InvalidParameters(message) => tracing::debug!(%message, "rejected request"),
        }
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameters_is_bad_request() {
        let err = ApiError::invalid("days must be a non-negative integer");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.body(),
            ErrorBody {
                error: "InvalidParameters",
                message: "days must be a non-negative integer".to_string(),
            }
        );
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let err = ApiError::from(WorkingDateError::InvalidDatetime("'2025-01-01 08:00' gap".into()));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = err.body();
        assert_eq!(body.error, "InternalError");
        assert!(!body.message.contains("gap"), "leaked: {}", body.message);
    }

    #[test]
    fn test_overflow_is_reported_as_invalid_parameters() {
        let err = ApiError::from(WorkingDateError::Overflow("no day after +262142-12-31".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(!err.body().message.contains("262142"));
    }
}
