//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route registration (at startup):
//!     (method, path, handler)
//!     → matcher.rs (parse path pattern)
//!     → router.rs (reject duplicates, append in order)
//!     → into_axum() freezes the table behind an Arc
//!
//! Incoming request (method, path):
//!     → router.rs (scan routes in order)
//!     → matcher.rs (match pattern, extract params)
//!     → handler.rs (invoke with request + params)
//!     → no match: 405 if another method matched the path, else 404
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable once mounted
//! - No regex in hot path (segment-by-segment matching)
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by registration)

pub mod error;
pub mod handler;
pub mod matcher;
pub mod router;

pub use error::RouterError;
pub use handler::Handler;
pub use matcher::{Params, PathPattern, Segment};
pub use router::{Route, RouteMatch, Router};
