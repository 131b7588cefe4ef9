//! Startup orchestration.
//!
//! # Responsibilities
//! - Build every route table from the validated configuration
//! - Mount them on a fresh `HttpServer`
//! - Log the resulting route table
//!
//! # Design Decisions
//! - Fail fast: any setup error is fatal, nothing is served
//! - Route tables are plain values handed to the server, no globals

use std::sync::Arc;

use thiserror::Error;

use crate::books::{books_router, BookStore};
use crate::config::ServerConfig;
use crate::http::{HttpServer, ServerError};
use crate::inspect::inspect_router;
use crate::routing::RouterError;

/// Errors that prevent the server from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("route setup failed: {0}")]
    Router(#[from] RouterError),

    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Build the server described by `config`.
pub fn build_server(config: ServerConfig) -> Result<HttpServer, StartupError> {
    let mut server = HttpServer::new(config.clone());

    if config.books.enabled {
        let store = Arc::new(BookStore::new());
        let router = books_router(store, &config.books.mount_path)?;
        server = server.mount(&config.books.mount_path, router)?;
    }

    if config.inspect.enabled {
        let router = inspect_router(&config.inspect)?;
        server = server.mount(&config.inspect.mount_path, router)?;
    }

    for (prefix, router) in server.mounts() {
        for route in router.routes() {
            tracing::info!(
                method = %route.method(),
                path = %format!("{}{}", prefix, route.pattern()),
                action = route.action().map(|a| a.as_str()).unwrap_or("custom"),
                "Route"
            );
        }
    }

    Ok(server)
}
