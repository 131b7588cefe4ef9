//! In-memory book storage.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// A stored book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
}

/// Payload for creating a book.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    #[serde(default)]
    pub author: String,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
}

/// Concurrent map of books keyed by id.
///
/// Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct BookStore {
    books: DashMap<u64, Book>,
    next_id: AtomicU64,
}

impl BookStore {
    pub fn new() -> Self {
        Self {
            books: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// All books ordered by id.
    pub fn list(&self) -> Vec<Book> {
        let mut books: Vec<Book> = self.books.iter().map(|entry| entry.value().clone()).collect();
        books.sort_by_key(|b| b.id);
        books
    }

    pub fn get(&self, id: u64) -> Option<Book> {
        self.books.get(&id).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, new: NewBook) -> Book {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let book = Book {
            id,
            title: new.title,
            author: new.author,
        };
        self.books.insert(id, book.clone());
        book
    }

    /// Apply a patch, returning the updated book if it exists.
    pub fn update(&self, id: u64, patch: BookPatch) -> Option<Book> {
        let mut entry = self.books.get_mut(&id)?;
        if let Some(title) = patch.title {
            entry.title = title;
        }
        if let Some(author) = patch.author {
            entry.author = author;
        }
        Some(entry.clone())
    }

    pub fn remove(&self, id: u64) -> Option<Book> {
        self.books.remove(&id).map(|(_, book)| book)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_book(title: &str) -> NewBook {
        NewBook {
            title: title.into(),
            author: "anon".into(),
        }
    }

    #[test]
    fn test_ids_are_sequential_and_not_reused() {
        let store = BookStore::new();
        let a = store.insert(new_book("a"));
        let b = store.insert(new_book("b"));
        assert_eq!((a.id, b.id), (1, 2));

        store.remove(b.id).unwrap();
        let c = store.insert(new_book("c"));
        assert_eq!(c.id, 3);
    }

    #[test]
    fn test_list_sorted_by_id() {
        let store = BookStore::new();
        for title in ["x", "y", "z"] {
            store.insert(new_book(title));
        }
        let titles: Vec<String> = store.list().into_iter().map(|b| b.title).collect();
        assert_eq!(titles, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_partial_update() {
        let store = BookStore::new();
        let book = store.insert(new_book("Dune"));

        let updated = store
            .update(
                book.id,
                BookPatch {
                    author: Some("Frank Herbert".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.title, "Dune");
        assert_eq!(updated.author, "Frank Herbert");

        assert!(store.update(99, BookPatch::default()).is_none());
    }

    #[test]
    fn test_remove_missing() {
        let store = BookStore::new();
        assert!(store.remove(1).is_none());
        assert!(store.is_empty());
    }
}
