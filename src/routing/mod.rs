//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (literal path lookup)
//!     → method filter (405 when the path exists but the verb does not)
//!     → handler, or the not-found fallback
//! ```
//!
//! # Design Decisions
//! - Routes are a fixed table built once at startup, immutable at runtime
//! - Paths are disjoint literals, so at most one route can match
//! - Deterministic: the same request always reaches the same handler

pub mod router;

pub use router::build_routes;
