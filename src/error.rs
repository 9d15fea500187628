use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::ors::OrsError;

/// Request-scoped failures, each pinned to the status code the caller sees.
/// Startup failures never reach this type; they abort the process through
/// `anyhow` before the server binds.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body failed to parse or a field failed its constraint.
    #[error("{0}")]
    InvalidInput(String),
    /// An address or route genuinely does not exist upstream.
    #[error("{0}")]
    NotFound(String),
    #[error("OpenRouteService timed out. Try again or increase timeout.")]
    UpstreamTimeout,
    #[error("ORS request failed: {0}")]
    Upstream(String),
    #[error("Internal prediction error: {0}")]
    Prediction(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::NotFound(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Prediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<OrsError> for ApiError {
    fn from(err: OrsError) -> Self {
        match err {
            OrsError::Timeout => ApiError::UpstreamTimeout,
            OrsError::AddressNotFound(_) | OrsError::NoRoute => {
                ApiError::NotFound(err.to_string())
            }
            OrsError::UpstreamStatus { .. } | OrsError::Decode(_) | OrsError::Transport(_) => {
                ApiError::Upstream(err.to_string())
            }
        }
    }
}
