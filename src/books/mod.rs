//! Books demo resource.
//!
//! A JSON controller for a `books` resource backed by an in-memory store.
//! It exists to exercise the resource router end to end; nothing is
//! persisted.

pub mod controller;
pub mod store;

pub use controller::{books_router, BooksController};
pub use store::{Book, BookPatch, BookStore, NewBook};
