//! Shared utilities for integration tests.

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::Request;
use axum::http::{self, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use resource_router::lifecycle::{build_server, Shutdown};
use resource_router::{Controller, Params, ServerConfig};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceExt;

/// Controller that answers every action with `"{action}:{id}"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoController;

fn echo(action: &str, params: &Params) -> Response {
    if params.is_empty() {
        return format!("{}:-", action).into_response();
    }
    format!("{}:{}", action, params.get("id").unwrap_or("?")).into_response()
}

impl Controller for EchoController {
    async fn list(&self, _req: Request, params: Params) -> Response {
        echo("list", &params)
    }

    async fn new(&self, _req: Request, params: Params) -> Response {
        echo("new", &params)
    }

    async fn create(&self, _req: Request, params: Params) -> Response {
        echo("create", &params)
    }

    async fn show(&self, _req: Request, params: Params) -> Response {
        echo("show", &params)
    }

    async fn edit(&self, _req: Request, params: Params) -> Response {
        echo("edit", &params)
    }

    async fn update(&self, _req: Request, params: Params) -> Response {
        echo("update", &params)
    }

    async fn destroy(&self, _req: Request, params: Params) -> Response {
        echo("destroy", &params)
    }
}

/// Send a bodiless request through an in-process app.
#[allow(dead_code)]
pub async fn send(app: &axum::Router, method: Method, uri: &str) -> (StatusCode, HeaderMap, String) {
    let req = http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

/// A server running on an ephemeral local port.
#[allow(dead_code)]
pub struct RunningServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<()>,
}

#[allow(dead_code)]
impl RunningServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger graceful shutdown and wait for the server task.
    pub async fn stop(self) {
        self.shutdown.trigger();
        self.handle.await.unwrap();
    }
}

/// Build the configured server and serve it on 127.0.0.1:0.
#[allow(dead_code)]
pub async fn start_server(config: ServerConfig) -> RunningServer {
    let server = build_server(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move {
        server.run(listener, server_shutdown).await.unwrap();
    });

    RunningServer {
        addr,
        shutdown,
        handle,
    }
}
