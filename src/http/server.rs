//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Mount explicitly constructed route tables under path prefixes
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener and shut down gracefully

use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::validation::mount_path_problem;
use crate::config::ServerConfig;
use crate::http::request::request_id_layers;
use crate::routing::Router as ResourceRouter;

/// Errors raised while assembling or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("mount path `{path}` is already in use")]
    DuplicateMount { path: String },

    #[error("invalid mount path `{path}`: {reason}")]
    InvalidMount { path: String, reason: &'static str },

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP server hosting one or more route tables.
pub struct HttpServer {
    config: ServerConfig,
    mounts: Vec<(String, ResourceRouter)>,
}

impl HttpServer {
    /// Create a server with nothing mounted.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            mounts: Vec::new(),
        }
    }

    /// Mount a route table under `path`.
    pub fn mount(mut self, path: &str, router: ResourceRouter) -> Result<Self, ServerError> {
        if let Some(reason) = mount_path_problem(path) {
            return Err(ServerError::InvalidMount {
                path: path.to_string(),
                reason,
            });
        }
        if self.mounts.iter().any(|(p, _)| p == path) {
            return Err(ServerError::DuplicateMount {
                path: path.to_string(),
            });
        }

        tracing::info!(
            path = %path,
            resource = router.resource().unwrap_or("-"),
            routes = router.len(),
            "Router mounted"
        );
        self.mounts.push((path.to_string(), router));
        Ok(self)
    }

    /// Mounted prefixes with their route tables, in mount order.
    pub fn mounts(&self) -> &[(String, ResourceRouter)] {
        &self.mounts
    }

    /// Build the axum application. Consumes the mounted tables.
    #[allow(deprecated)]
    pub fn into_router(self) -> axum::Router {
        let timeout = Duration::from_secs(self.config.timeouts.request_secs);

        let mut app = axum::Router::new();
        for (path, router) in self.mounts {
            app = app.nest_service(&path, router.into_axum());
        }

        app.fallback(|| async { StatusCode::NOT_FOUND })
            .layer(TimeoutLayer::new(timeout))
            .layer(TraceLayer::new_for_http())
            .layer(request_id_layers())
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.into_router();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
