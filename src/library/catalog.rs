//! Book catalog and its operations.

use super::book::{Book, BookFilter, BookPayload, BookSummary, Criterion};
use super::source::{Clock, IdGenerator, SystemClock, UuidGenerator};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Catalog operation that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Creating a book.
    Add,
    /// Fetching a single book.
    Get,
    /// Updating a book.
    Update,
    /// Deleting a book.
    Delete,
}

impl Action {
    /// Failure prefix used in error messages.
    pub fn failure(&self) -> &'static str {
        match self {
            Action::Add => "Failed to add book",
            Action::Get => "Failed to get book",
            Action::Update => "Failed to update book",
            Action::Delete => "Failed to delete book",
        }
    }

    fn not_found(&self) -> String {
        match self {
            Action::Get => "Book not found".to_string(),
            _ => format!("{}. Id not found", self.failure()),
        }
    }
}

/// Catalog errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Name absent or empty.
    #[error("{}. Please provide the book name", .0.failure())]
    MissingName(Action),

    /// `readPage` greater than `pageCount`.
    #[error("{}. readPage must not be greater than pageCount", .0.failure())]
    PageCountExceeded(Action),

    /// No book with the requested ID.
    #[error("{}", .0.not_found())]
    NotFound(Action),

    /// A created book could not be stored.
    #[error("Failed to add book")]
    InsertionFailed,
}

/// How `list` behaves when no filter criterion is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnfilteredListing {
    /// Only the first book of each name, in insertion order.
    #[default]
    DistinctNames,
    /// Every book.
    All,
}

/// Stored books plus every ID handed out so far.
#[derive(Default)]
struct Shelf {
    books: Vec<Book>,
    issued: HashSet<String>,
}

/// In-memory collection of books.
pub struct Catalog {
    shelf: RwLock<Shelf>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    unfiltered: UnfilteredListing,
}

impl Catalog {
    /// Create an empty catalog using the wall clock and UUID identifiers.
    pub fn new(unfiltered: UnfilteredListing) -> Self {
        Self::with_sources(Arc::new(SystemClock), Arc::new(UuidGenerator), unfiltered)
    }

    /// Create an empty catalog with explicit time and ID sources.
    pub fn with_sources(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        unfiltered: UnfilteredListing,
    ) -> Self {
        Self {
            shelf: RwLock::new(Shelf::default()),
            clock,
            ids,
            unfiltered,
        }
    }

    /// Add a book, returning its new ID.
    ///
    /// IDs are never reused, even after the book holding one is deleted.
    pub fn create(&self, payload: BookPayload) -> Result<String, CatalogError> {
        let (name, payload) = validate(payload, Action::Add)?;

        let id = self.ids.generate();
        let now = self.clock.now();

        let mut shelf = self.shelf.write();
        if !shelf.issued.insert(id.clone()) {
            tracing::error!(book_id = %id, "Generated ID was issued before");
            return Err(CatalogError::InsertionFailed);
        }

        shelf.books.push(Book::new(id.clone(), name, payload, now));

        if !shelf.books.iter().any(|b| b.id == id) {
            return Err(CatalogError::InsertionFailed);
        }

        tracing::info!(book_id = %id, books = shelf.books.len(), "Book added");
        Ok(id)
    }

    /// List books matching the filter.
    pub fn list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        let shelf = self.shelf.read();
        let books = &shelf.books;

        let selected: Vec<&Book> = match filter.criterion() {
            Criterion::Name(term) => books.iter().filter(|b| b.name_has_word(term)).collect(),
            Criterion::Reading(flag) => books
                .iter()
                .filter(|b| b.reading == Some(flag))
                .collect(),
            Criterion::Finished(flag) => books.iter().filter(|b| b.finished == flag).collect(),
            Criterion::Unfiltered => match self.unfiltered {
                UnfilteredListing::All => books.iter().collect(),
                UnfilteredListing::DistinctNames => {
                    let mut seen = HashSet::new();
                    books
                        .iter()
                        .filter(|&b| seen.insert(b.name.as_str()))
                        .collect()
                }
            },
        };

        tracing::debug!(?filter, matched = selected.len(), "Listing books");
        selected.into_iter().map(Book::summary_view).collect()
    }

    /// Get a book by ID.
    pub fn get(&self, id: &str) -> Result<Book, CatalogError> {
        self.shelf
            .read()
            .books
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(Action::Get))
    }

    /// Replace a book's fields.
    pub fn update(&self, id: &str, payload: BookPayload) -> Result<(), CatalogError> {
        let (name, payload) = validate(payload, Action::Update)?;
        let now = self.clock.now();

        let mut shelf = self.shelf.write();
        let book = shelf
            .books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(CatalogError::NotFound(Action::Update))?;

        book.apply(name, payload, now);

        tracing::info!(book_id = %id, "Book updated");
        Ok(())
    }

    /// Remove a book.
    pub fn delete(&self, id: &str) -> Result<(), CatalogError> {
        let mut shelf = self.shelf.write();
        let index = shelf
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or(CatalogError::NotFound(Action::Delete))?;

        shelf.books.remove(index);

        tracing::info!(book_id = %id, books = shelf.books.len(), "Book deleted");
        Ok(())
    }

    /// Number of stored books.
    pub fn len(&self) -> usize {
        self.shelf.read().books.len()
    }

    /// Whether the catalog holds no books.
    pub fn is_empty(&self) -> bool {
        self.shelf.read().books.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(UnfilteredListing::default())
    }
}

/// Check the payload, returning the name separately.
fn validate(
    mut payload: BookPayload,
    action: Action,
) -> Result<(String, BookPayload), CatalogError> {
    let name = payload
        .name
        .take()
        .filter(|n| !n.is_empty())
        .ok_or(CatalogError::MissingName(action))?;

    if payload.read_page_exceeds_count() {
        return Err(CatalogError::PageCountExceeded(action));
    }

    Ok((name, payload))
}
