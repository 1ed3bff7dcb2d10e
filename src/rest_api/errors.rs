//! REST error types and status mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::parser::ParseError;
use crate::store::RejectReason;

/// Result type for REST handlers.
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors.
#[derive(Debug, Error)]
pub enum RestError {
    /// Malformed or unusable request input.
    #[error("{0}")]
    InvalidRequest(String),

    /// Target record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A store guard refused the write.
    #[error("{0}")]
    Rejected(#[from] RejectReason),

    /// Loader failure during `load`.
    #[error("{0}")]
    Load(#[from] ParseError),

    /// No dataset has been loaded yet.
    #[error("No records found. Load a CSV file first using POST /api/pricing/load")]
    NoData,

    /// Unexpected server-side failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RestError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RestError::NoData => StatusCode::BAD_REQUEST,
            RestError::NotFound(_) => StatusCode::NOT_FOUND,
            // A rename collision is a conflict with existing state; a bad
            // price is just a bad request
            RestError::Rejected(RejectReason::GuidTaken(_)) => StatusCode::CONFLICT,
            RestError::Rejected(RejectReason::NonPositivePrice(_)) => StatusCode::BAD_REQUEST,
            RestError::Load(ParseError::UnsupportedFormat(_)) => StatusCode::BAD_REQUEST,
            RestError::Load(ParseError::Csv(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
