//! Type-erased route handlers.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use futures_util::future::{BoxFuture, FutureExt};

use crate::routing::Params;

type HandlerFn = dyn Fn(Request, Params) -> BoxFuture<'static, Response> + Send + Sync;

/// An async function taking the request context and its path parameters.
///
/// Cheap to clone; every clone shares the same underlying function.
#[derive(Clone)]
pub struct Handler {
    inner: Arc<HandlerFn>,
}

impl Handler {
    /// Wrap any async function whose output converts into a response.
    pub fn new<F, Fut, R>(f: F) -> Self
    where
        F: Fn(Request, Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + 'static,
    {
        Self {
            inner: Arc::new(move |req, params| {
                f(req, params).map(IntoResponse::into_response).boxed()
            }),
        }
    }

    /// Invoke the handler.
    pub fn call(&self, req: Request, params: Params) -> BoxFuture<'static, Response> {
        (self.inner)(req, params)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler")
    }
}
