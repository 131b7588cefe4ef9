//! Declarative REST resource routing for axum.
//!
//! A controller exposing the seven conventional actions is turned into an
//! ordered route table:
//!
//! ```text
//! GET    /new        → new
//! GET    /:id/edit   → edit
//! GET    /           → list
//! POST   /           → create
//! GET    /:id        → show
//! PATCH  /:id        → update
//! DELETE /:id        → destroy
//! ```
//!
//! Literal routes are registered before `/:id`, so `/new` never reaches
//! `show`. Custom routes can be appended afterwards. The finished table is
//! mounted on an axum application under a path prefix and is read-only from
//! then on.

// Core
pub mod resource;
pub mod routing;

// Hosting
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

// Demo resources
pub mod books;
pub mod inspect;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use resource::{register_resource, Action, ActionTable, Controller};
pub use routing::{Handler, Params, Router, RouterError};
