//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store routes in registration order
//! - Look up the first route matching a request's method and path
//! - Return the matched route or an explicit no-match
//!
//! # Design Decisions
//! - Ordered `Vec`, never a map: registration order is match order
//! - Immutable once mounted (shared through `Arc`, no locks)
//! - O(n) scan over routes (acceptable for typical route counts)
//! - No logging at dispatch time; unmatched requests get the framework's
//!   404/405 convention

use std::sync::Arc;

use axum::extract::Request;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::resource::Action;
use crate::routing::{Handler, Params, PathPattern, RouterError};

/// A single (verb, path pattern, handler) entry.
#[derive(Debug, Clone)]
pub struct Route {
    method: Method,
    pattern: PathPattern,
    handler: Handler,
    action: Option<Action>,
}

impl Route {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// The conventional action this route was registered for, if any.
    pub fn action(&self) -> Option<Action> {
        self.action
    }
}

/// Outcome of looking up a request in the route table.
#[derive(Debug)]
pub enum RouteMatch<'a> {
    /// First route whose method and pattern both match.
    Found { route: &'a Route, params: Params },
    /// The path matched, but only under other methods.
    MethodNotAllowed { allowed: Vec<Method> },
    /// Nothing matched the path.
    NotFound,
}

/// Ordered route table for one resource (or a set of ad-hoc routes).
#[derive(Debug, Clone, Default)]
pub struct Router {
    resource: Option<String>,
    routes: Vec<Route>,
}

impl Router {
    /// Create an empty router with no resource name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty router labelled with a resource name.
    pub fn for_resource(resource: impl Into<String>) -> Self {
        Self {
            resource: Some(resource.into()),
            routes: Vec::new(),
        }
    }

    /// The resource this router was built for.
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Registered routes in match order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Append a route at the end of the table.
    ///
    /// Fails if a route with the same method and path shape already exists.
    pub fn route(
        &mut self,
        method: Method,
        path: &str,
        handler: Handler,
    ) -> Result<&mut Self, RouterError> {
        self.push(method, path, handler, None)?;
        Ok(self)
    }

    pub fn get(&mut self, path: &str, handler: Handler) -> Result<&mut Self, RouterError> {
        self.route(Method::GET, path, handler)
    }

    pub fn post(&mut self, path: &str, handler: Handler) -> Result<&mut Self, RouterError> {
        self.route(Method::POST, path, handler)
    }

    pub fn put(&mut self, path: &str, handler: Handler) -> Result<&mut Self, RouterError> {
        self.route(Method::PUT, path, handler)
    }

    pub fn patch(&mut self, path: &str, handler: Handler) -> Result<&mut Self, RouterError> {
        self.route(Method::PATCH, path, handler)
    }

    pub fn delete(&mut self, path: &str, handler: Handler) -> Result<&mut Self, RouterError> {
        self.route(Method::DELETE, path, handler)
    }

    pub(crate) fn push(
        &mut self,
        method: Method,
        path: &str,
        handler: Handler,
        action: Option<Action>,
    ) -> Result<(), RouterError> {
        let pattern = PathPattern::parse(path)?;

        if self
            .routes
            .iter()
            .any(|r| r.method == method && r.pattern.same_shape(&pattern))
        {
            return Err(RouterError::DuplicateRoute {
                method,
                path: path.to_string(),
            });
        }

        if let Some(earlier) = self
            .routes
            .iter()
            .find(|r| r.method == method && r.pattern.covers(&pattern))
        {
            tracing::warn!(
                resource = self.resource.as_deref().unwrap_or("-"),
                method = %method,
                path = %pattern,
                shadowed_by = %earlier.pattern,
                "Route is unreachable, an earlier route matches every path it matches"
            );
        }

        tracing::debug!(
            resource = self.resource.as_deref().unwrap_or("-"),
            method = %method,
            path = %pattern,
            action = action.map(|a| a.as_str()).unwrap_or("custom"),
            "Route registered"
        );

        self.routes.push(Route {
            method,
            pattern,
            handler,
            action,
        });
        Ok(())
    }

    /// Find the first route matching `method` and `path`.
    pub fn match_route(&self, method: &Method, path: &str) -> RouteMatch<'_> {
        let mut allowed: Vec<Method> = Vec::new();

        for route in &self.routes {
            let Some(params) = route.pattern.matches(path) else {
                continue;
            };
            if route.method == *method {
                return RouteMatch::Found { route, params };
            }
            if !allowed.contains(&route.method) {
                allowed.push(route.method.clone());
            }
        }

        if allowed.is_empty() {
            RouteMatch::NotFound
        } else {
            RouteMatch::MethodNotAllowed { allowed }
        }
    }

    /// Dispatch a request to the first matching route.
    ///
    /// Matched params are passed to the handler and also stored in the
    /// request extensions.
    pub async fn dispatch(&self, mut req: Request) -> Response {
        let found = match self.match_route(req.method(), req.uri().path()) {
            RouteMatch::Found { route, params } => Some((route.handler.clone(), params)),
            RouteMatch::MethodNotAllowed { allowed } => {
                return method_not_allowed(&allowed);
            }
            RouteMatch::NotFound => None,
        };

        match found {
            Some((handler, params)) => {
                req.extensions_mut().insert(params.clone());
                handler.call(req, params).await
            }
            None => StatusCode::NOT_FOUND.into_response(),
        }
    }

    /// Freeze the table and expose it as an axum service for `nest_service`.
    pub fn into_axum(self) -> axum::Router {
        let table = Arc::new(self);
        axum::Router::new().fallback(move |req: Request| {
            let table = table.clone();
            async move { table.dispatch(req).await }
        })
    }
}

fn method_not_allowed(allowed: &[Method]) -> Response {
    let allow = allowed
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    let mut res = StatusCode::METHOD_NOT_ALLOWED.into_response();
    if let Ok(value) = HeaderValue::from_str(&allow) {
        res.headers_mut().insert(header::ALLOW, value);
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn text(body: &'static str) -> Handler {
        Handler::new(move |_req, _params| async move { body })
    }

    fn request(method: Method, uri: &str) -> Request {
        axum::http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_of(res: Response) -> String {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_first_match_wins() {
        let mut router = Router::new();
        router
            .get("/:id", text("by id"))
            .unwrap()
            .get("/count", text("count"))
            .unwrap();

        match router.match_route(&Method::GET, "/count") {
            RouteMatch::Found { route, params } => {
                assert_eq!(route.pattern().as_str(), "/:id");
                assert_eq!(params.get("id"), Some("count"));
            }
            other => panic!("unexpected match: {:?}", other),
        }
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_shadowed_route_accepted_with_warning() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let mut router = Router::for_resource("books");
        tracing::subscriber::with_default(subscriber, || {
            router
                .get("/:id", text("show"))
                .unwrap()
                .get("/count", text("count"))
                .unwrap()
                .get("/:id/summary", text("summary"))
                .unwrap();
        });

        assert_eq!(router.len(), 3);
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.matches("Route is unreachable").count(), 1);
        assert!(output.contains("path=/count"));
        assert!(output.contains("shadowed_by=/:id"));

        match router.match_route(&Method::GET, "/count") {
            RouteMatch::Found { route, .. } => assert_eq!(route.pattern().as_str(), "/:id"),
            other => panic!("unexpected match: {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_route_rejected() {
        let mut router = Router::new();
        router.get("/", text("a")).unwrap();

        let err = router.get("/", text("b")).unwrap_err();
        assert_eq!(
            err,
            RouterError::DuplicateRoute {
                method: Method::GET,
                path: "/".into()
            }
        );
        assert_eq!(router.len(), 1);
    }

    #[test]
    fn test_duplicate_detects_renamed_param() {
        let mut router = Router::new();
        router.get("/:id", text("a")).unwrap();
        assert!(matches!(
            router.get("/:key/", text("b")),
            Err(RouterError::DuplicateRoute { .. })
        ));
    }

    #[test]
    fn test_same_path_different_method_allowed() {
        let mut router = Router::new();
        router
            .get("/", text("list"))
            .unwrap()
            .post("/", text("create"))
            .unwrap();
        assert_eq!(router.len(), 2);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let mut router = Router::new();
        assert!(matches!(
            router.get("no-slash", text("x")),
            Err(RouterError::InvalidPattern { .. })
        ));
        assert!(router.is_empty());
    }

    #[test]
    fn test_method_not_allowed_lists_methods_once() {
        let mut router = Router::new();
        router
            .get("/:id", text("show"))
            .unwrap()
            .patch("/:id", text("update"))
            .unwrap()
            .get("/:id/", text("dup"))
            .unwrap_err();

        match router.match_route(&Method::POST, "/42") {
            RouteMatch::MethodNotAllowed { allowed } => {
                assert_eq!(allowed, vec![Method::GET, Method::PATCH]);
            }
            other => panic!("unexpected match: {:?}", other),
        }
    }

    #[test]
    fn test_not_found() {
        let router = Router::new();
        assert!(matches!(
            router.match_route(&Method::GET, "/"),
            RouteMatch::NotFound
        ));
    }

    #[tokio::test]
    async fn test_dispatch_passes_params() {
        let mut router = Router::new();
        router
            .get(
                "/:id",
                Handler::new(|req: Request, params: Params| async move {
                    let from_ext = req.extensions().get::<Params>().cloned();
                    assert_eq!(from_ext.as_ref(), Some(&params));
                    format!("id={}", params.get("id").unwrap_or_default())
                }),
            )
            .unwrap();

        let res = router.dispatch(request(Method::GET, "/42?x=1")).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_of(res).await, "id=42");
    }

    #[tokio::test]
    async fn test_dispatch_unmatched() {
        let mut router = Router::new();
        router.get("/:id", text("show")).unwrap();

        let res = router.dispatch(request(Method::DELETE, "/42")).await;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.headers()[header::ALLOW], "GET");

        let res = router.dispatch(request(Method::GET, "/42/edit")).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
