//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every request:
//!     → TraceLayer span (method, uri, request id)
//!     → handler debug events
//!     → metrics.rs (counter + latency histogram)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
pub use metrics::init_metrics;
