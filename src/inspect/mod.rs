//! Request inspection.
//!
//! # Data Flow
//! ```text
//! GET {mount}/headers
//!     → handlers.rs dump_headers (all headers + Cache-Control lookup)
//!     → JSON
//!
//! GET {mount}/url
//!     → handlers.rs describe_url (protocol, host, original URI)
//!     → parse.rs parse_url (absolute URL → components)
//!     → JSON
//! ```
//!
//! # Design Decisions
//! - X-Forwarded-* headers are ignored unless `trust_proxy` is set
//! - The URL is reported as the client sent it, mount prefix included

pub mod handlers;
pub mod parse;

pub use handlers::{describe_url, dump_headers, inspect_router, HeaderDump, RequestUrl};
pub use parse::{parse_url, query_object, subdomains, InspectError, UrlParts};
