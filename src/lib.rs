//! HTTP request echo service in the httpbin style.
//!
//! A single stateless Axum router: echo routes reflect the request back as
//! JSON, fixed routes serve embedded HTML, image and JSON payloads, and
//! `/gzip` serves a compressed JSON echo.

pub mod config;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
