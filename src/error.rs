//! Gateway error taxonomy and HTTP rendering.
//!
//! # Responsibilities
//! - Classify request failures (validation, upstream, transport, no-route)
//! - Render each class as the correct HTTP response
//! - Translate Host collaborator failures into gateway errors
//!
//! # Design Decisions
//! - Errors are per-request; there is no retry or backoff anywhere
//! - Upstream failures mirror the upstream status and message verbatim
//! - Failures without an attached status collapse to a generic server error

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::host::HostError;

/// Errors that can occur while handling a gateway request.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed client input recognized locally.
    #[error("{0}")]
    Validation(String),

    /// A Host call failed with an explicit status from the upstream
    /// session or launcher.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    /// A Host call failed without an attached HTTP status.
    #[error("transport failure: {0}")]
    Transport(String),

    /// No route template matches the request path/method.
    #[error("not found")]
    NotFound,
}

/// Result type for gateway request handling.
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<HostError> for GatewayError {
    fn from(err: HostError) -> Self {
        match err {
            HostError::Upstream { status, message } => GatewayError::Upstream { status, message },
            HostError::Transport(message) => GatewayError::Transport(message),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"))],
                message,
            )
                .into_response(),
            GatewayError::Upstream { status, message } => {
                // No retry: the upstream verdict is final for this request.
                (status, message).into_response()
            }
            GatewayError::Transport(message) => {
                tracing::error!(error = %message, "Host call failed without an upstream status");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
                    .into_response()
            }
            GatewayError::NotFound => StatusCode::NOT_FOUND.into_response(),
        }
    }
}
