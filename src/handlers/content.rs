//! Fixed-content handlers: HTML, images and JSON.
//!
//! Fixtures are compiled into the binary and served from `'static` memory,
//! so every request shares the same immutable buffers.

use axum::{response::Response, Json};
use serde_json::{Map, Value};

use crate::http::response::fixed;

/// Body served by `/html`.
pub const HTML_PAGE: &str = "<html><body><h1>Hello World</h1></body></html>";

/// Fixture served by `/image/png`.
pub static PNG_IMAGE: &[u8] = include_bytes!("../../assets/sample.png");

/// Fixture served by `/image/jpeg`.
pub static JPEG_IMAGE: &[u8] = include_bytes!("../../assets/sample.jpg");

/// `GET /html`
pub async fn html() -> Response {
    fixed("text/html", HTML_PAGE)
}

/// `GET /image/png`
pub async fn png() -> Response {
    fixed("image/png", PNG_IMAGE)
}

/// `GET /image/jpeg`
pub async fn jpeg() -> Response {
    fixed("image/jpeg", JPEG_IMAGE)
}

/// `GET /json`
pub async fn json() -> Json<Value> {
    Json(Value::Object(Map::new()))
}

/// `GET /jsonp`
///
/// Answers with plain JSON; a `callback` parameter does not wrap the body.
pub async fn jsonp() -> Json<Value> {
    Json(Value::Object(Map::new()))
}
