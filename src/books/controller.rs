//! The `books` resource controller.

use std::sync::Arc;

use axum::extract::Request;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::books::store::{BookPatch, BookStore, NewBook};
use crate::resource::{register_resource, ActionTable, Controller};
use crate::routing::{Handler, Params, Router, RouterError};

/// Largest request body the controller will buffer.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// JSON controller over a [`BookStore`].
#[derive(Debug, Clone)]
pub struct BooksController {
    store: Arc<BookStore>,
    mount_path: String,
}

impl BooksController {
    /// `mount_path` is used to build `Location` headers and edit-form actions.
    pub fn new(store: Arc<BookStore>, mount_path: impl Into<String>) -> Self {
        Self {
            store,
            mount_path: mount_path.into(),
        }
    }

    fn member_path(&self, id: u64) -> String {
        format!("{}/{}", self.mount_path, id)
    }
}

impl Controller for BooksController {
    async fn list(&self, _req: Request, _params: Params) -> Response {
        Json(self.store.list()).into_response()
    }

    async fn new(&self, _req: Request, _params: Params) -> Response {
        Json(json!({
            "action": self.mount_path,
            "method": "POST",
            "book": NewBook::default(),
        }))
        .into_response()
    }

    async fn create(&self, req: Request, _params: Params) -> Response {
        let new: NewBook = match read_json(req).await {
            Ok(new) => new,
            Err(res) => return res,
        };
        if new.title.trim().is_empty() {
            return error(StatusCode::BAD_REQUEST, "title must not be empty");
        }

        let book = self.store.insert(new);
        tracing::debug!(
            id = book.id,
            title = %book.title,
            total = self.store.len(),
            "Book created"
        );

        let mut res = (StatusCode::CREATED, Json(&book)).into_response();
        if let Ok(location) = HeaderValue::from_str(&self.member_path(book.id)) {
            res.headers_mut().insert(header::LOCATION, location);
        }
        res
    }

    async fn show(&self, _req: Request, params: Params) -> Response {
        match book_id(&params).and_then(|id| self.store.get(id)) {
            Some(book) => Json(book).into_response(),
            None => not_found(),
        }
    }

    async fn edit(&self, _req: Request, params: Params) -> Response {
        match book_id(&params).and_then(|id| self.store.get(id)) {
            Some(book) => Json(json!({
                "action": self.member_path(book.id),
                "method": "PATCH",
                "book": book,
            }))
            .into_response(),
            None => not_found(),
        }
    }

    async fn update(&self, req: Request, params: Params) -> Response {
        let Some(id) = book_id(&params) else {
            return not_found();
        };
        let patch: BookPatch = match read_json(req).await {
            Ok(patch) => patch,
            Err(res) => return res,
        };
        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return error(StatusCode::BAD_REQUEST, "title must not be empty");
        }

        match self.store.update(id, patch) {
            Some(book) => Json(book).into_response(),
            None => not_found(),
        }
    }

    async fn destroy(&self, _req: Request, params: Params) -> Response {
        match book_id(&params).and_then(|id| self.store.remove(id)) {
            Some(book) => {
                tracing::debug!(id = book.id, total = self.store.len(), "Book deleted");
                StatusCode::NO_CONTENT.into_response()
            }
            None => not_found(),
        }
    }
}

/// Build the books router: the seven conventional routes plus
/// `GET /:id/summary`.
pub fn books_router(store: Arc<BookStore>, mount_path: &str) -> Result<Router, RouterError> {
    let controller = BooksController::new(store.clone(), mount_path);
    let mut router = register_resource(ActionTable::from_controller("books", controller))?;

    router.get(
        "/:id/summary",
        Handler::new(move |_req, params: Params| {
            let store = store.clone();
            async move {
                match book_id(&params).and_then(|id| store.get(id)) {
                    Some(book) if book.author.is_empty() => book.title.into_response(),
                    Some(book) => format!("{} by {}", book.title, book.author).into_response(),
                    None => not_found(),
                }
            }
        }),
    )?;

    Ok(router)
}

fn book_id(params: &Params) -> Option<u64> {
    params.get("id")?.parse().ok()
}

async fn read_json<T: DeserializeOwned>(req: Request) -> Result<T, Response> {
    let bytes = axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|_| error(StatusCode::PAYLOAD_TOO_LARGE, "request body too large"))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| error(StatusCode::BAD_REQUEST, &format!("invalid JSON body: {e}")))
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, "book not found")
}
