//! Request handlers.
//!
//! Each handler is a pure function of its request: no handler reads or
//! writes state that outlives the request it is serving.
//!
//! - `echo.rs`: reflect args, headers, body back as JSON
//! - `body.rs`: interpret form, multipart and raw bodies
//! - `content.rs`: fixed HTML, image and JSON payloads
//! - `gzip.rs`: gzip-encoded JSON
//! - `status.rs`: caller-chosen status codes

pub mod body;
pub mod content;
pub mod echo;
pub mod gzip;
pub mod status;

use axum::http::Uri;

use crate::http::HandlerError;

/// Fallback for paths no route claims.
pub async fn not_found(uri: Uri) -> HandlerError {
    tracing::debug!(path = %uri.path(), "No route matched");
    HandlerError::NotFound
}
