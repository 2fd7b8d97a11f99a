//! `/status/{code}`: answer with an arbitrary status code.

use axum::{extract::Path, http::StatusCode};

use crate::http::HandlerError;

/// Respond with `code` and an empty body. Only 200..=599 is served.
///
/// The segment is parsed here rather than by `Path<u16>` so that every
/// rejection carries the JSON error body.
pub async fn status(Path(code): Path<String>) -> Result<StatusCode, HandlerError> {
    code.parse::<u16>()
        .ok()
        .filter(|c| (200..=599).contains(c))
        .and_then(|c| StatusCode::from_u16(c).ok())
        .ok_or(HandlerError::InvalidStatus(code))
}
