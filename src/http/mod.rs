//! HTTP hosting subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum app, middleware stack)
//!     → request.rs (assign / propagate x-request-id)
//!     → nest_service(prefix) strips the mount path
//!     → routing::Router::dispatch (first matching route)
//!     → handler response, request id echoed
//! ```

pub mod request;
pub mod server;

pub use request::{request_id_layers, X_REQUEST_ID};
pub use server::{HttpServer, ServerError};
