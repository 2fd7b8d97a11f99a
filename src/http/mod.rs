//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, request inspection)
//!     → routing table → handler
//!     → response.rs (fixed bodies, error mapping)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, RequestInfo, X_REQUEST_ID};
pub use response::HandlerError;
pub use server::HttpServer;
