//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router setup (registration, shadowing, mounts)
//!     → tracing events (debug/warn/info)
//! HTTP requests
//!     → tower-http TraceLayer spans, tagged by x-request-id
//!     → logging.rs subscriber (stdout)
//! ```

pub mod logging;
