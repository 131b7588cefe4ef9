//! Controllers and conventional route registration.

use std::future::Future;
use std::sync::Arc;

use axum::extract::Request;
use axum::response::Response;

use crate::resource::Action;
use crate::routing::{Handler, Params, Router, RouterError};

/// A bundle of the seven conventional handlers for one resource.
///
/// Implementing the trait makes a missing action a compile error. For
/// controllers assembled at runtime, see [`ActionTable`].
pub trait Controller: Send + Sync + 'static {
    /// `GET /`
    fn list(&self, req: Request, params: Params) -> impl Future<Output = Response> + Send;
    /// `GET /new`
    #[allow(clippy::new_ret_no_self, clippy::wrong_self_convention)]
    fn new(&self, req: Request, params: Params) -> impl Future<Output = Response> + Send;
    /// `POST /`
    fn create(&self, req: Request, params: Params) -> impl Future<Output = Response> + Send;
    /// `GET /:id`
    fn show(&self, req: Request, params: Params) -> impl Future<Output = Response> + Send;
    /// `GET /:id/edit`
    fn edit(&self, req: Request, params: Params) -> impl Future<Output = Response> + Send;
    /// `PATCH /:id`
    fn update(&self, req: Request, params: Params) -> impl Future<Output = Response> + Send;
    /// `DELETE /:id`
    fn destroy(&self, req: Request, params: Params) -> impl Future<Output = Response> + Send;
}

/// Setup-time view of a controller: one optional handler per action.
#[derive(Debug, Clone)]
pub struct ActionTable {
    resource: String,
    handlers: [Option<Handler>; 7],
}

impl ActionTable {
    /// An empty table for the named resource.
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            handlers: Default::default(),
        }
    }

    /// Bind every action to the matching method of `controller`.
    pub fn from_controller<C: Controller>(resource: impl Into<String>, controller: C) -> Self {
        let controller = Arc::new(controller);
        let mut table = Self::new(resource);

        macro_rules! bind {
            ($($action:ident => $method:ident),* $(,)?) => {
                $(
                    let c = controller.clone();
                    table = table.on(Action::$action, Handler::new(move |req, params| {
                        let c = c.clone();
                        async move { c.$method(req, params).await }
                    }));
                )*
            };
        }

        bind!(
            List => list,
            New => new,
            Create => create,
            Show => show,
            Edit => edit,
            Update => update,
            Destroy => destroy,
        );

        table
    }

    /// Bind (or rebind) a single action.
    pub fn on(mut self, action: Action, handler: Handler) -> Self {
        self.handlers[action.index()] = Some(handler);
        self
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Actions that have no handler yet, in registration order.
    pub fn missing(&self) -> Vec<Action> {
        Action::REGISTRATION_ORDER
            .into_iter()
            .filter(|a| self.handlers[a.index()].is_none())
            .collect()
    }
}

/// Build a router holding the seven conventional routes of a resource.
///
/// Either every route is registered or none is: missing actions are
/// reported before the table is touched.
pub fn register_resource(controller: impl Into<ActionTable>) -> Result<Router, RouterError> {
    let table = controller.into();

    if let Some(action) = table.missing().into_iter().next() {
        return Err(RouterError::MissingAction {
            resource: table.resource,
            action,
        });
    }

    let ActionTable { resource, handlers } = table;
    let mut router = Router::for_resource(resource);
    for action in Action::REGISTRATION_ORDER {
        if let Some(handler) = handlers[action.index()].clone() {
            router.push(action.method(), action.path(), handler, Some(action))?;
        }
    }

    tracing::debug!(
        resource = router.resource().unwrap_or("-"),
        routes = router.len(),
        "Resource registered"
    );

    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;

    fn noop() -> Handler {
        Handler::new(|_req, _params| async {})
    }

    fn full_table() -> ActionTable {
        Action::REGISTRATION_ORDER
            .into_iter()
            .fold(ActionTable::new("books"), |t, a| t.on(a, noop()))
    }

    #[test]
    fn test_register_resource_order() {
        let router = register_resource(full_table()).unwrap();

        let table: Vec<(Method, &str, Option<Action>)> = router
            .routes()
            .iter()
            .map(|r| (r.method().clone(), r.pattern().as_str(), r.action()))
            .collect();

        assert_eq!(
            table,
            vec![
                (Method::GET, "/new", Some(Action::New)),
                (Method::GET, "/:id/edit", Some(Action::Edit)),
                (Method::GET, "/", Some(Action::List)),
                (Method::POST, "/", Some(Action::Create)),
                (Method::GET, "/:id", Some(Action::Show)),
                (Method::PATCH, "/:id", Some(Action::Update)),
                (Method::DELETE, "/:id", Some(Action::Destroy)),
            ]
        );
        assert_eq!(router.resource(), Some("books"));
    }

    #[test]
    fn test_missing_destroy_reported() {
        let table = Action::REGISTRATION_ORDER
            .into_iter()
            .filter(|a| *a != Action::Destroy)
            .fold(ActionTable::new("books"), |t, a| t.on(a, noop()));

        assert_eq!(table.missing(), vec![Action::Destroy]);

        let err = register_resource(table).unwrap_err();
        assert_eq!(
            err,
            RouterError::MissingAction {
                resource: "books".into(),
                action: Action::Destroy
            }
        );
        assert_eq!(
            err.to_string(),
            "resource `books` is missing the `destroy` action"
        );
    }

    #[test]
    fn test_empty_table_reports_first_in_order() {
        let err = register_resource(ActionTable::new("authors")).unwrap_err();
        assert!(matches!(
            err,
            RouterError::MissingAction {
                action: Action::New,
                ..
            }
        ));
    }

    #[test]
    fn test_rebinding_replaces_handler() {
        let table = full_table().on(Action::Show, noop());
        assert!(table.missing().is_empty());
        assert_eq!(register_resource(table).unwrap().len(), 7);
    }
}
