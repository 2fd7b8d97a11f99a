//! Response helpers and handler error mapping.
//!
//! Every failure a handler can hit is mapped to an HTTP status with a small
//! JSON body; nothing a client sends can take the process down.

use axum::{
    body::Bytes,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by request handlers.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// No route matched the request path.
    #[error("not found")]
    NotFound,

    /// The request body could not be read.
    #[error("failed to read request body: {0}")]
    Body(#[from] axum::Error),

    /// The status route was asked for a code it cannot serve.
    #[error("invalid status code: {0}")]
    InvalidStatus(String),

    /// Compressing the response failed.
    #[error("failed to encode response: {0}")]
    Encode(#[from] std::io::Error),

    /// Serializing the response failed.
    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl HandlerError {
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerError::NotFound => StatusCode::NOT_FOUND,
            HandlerError::Body(_) | HandlerError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            HandlerError::Encode(_) | HandlerError::Serialize(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Handler failed");
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// A response with a fixed body and exact `content-type` and `content-length`.
pub fn fixed(content_type: &'static str, body: impl Into<Bytes>) -> Response {
    let body = body.into();
    let length = HeaderValue::from(body.len());
    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(content_type)),
            (header::CONTENT_LENGTH, length),
        ],
        body,
    )
        .into_response()
}
