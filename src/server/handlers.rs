//! HTTP request handlers.

use crate::error::{AppError, Result};
use crate::library::{Action, Book, BookFilter, BookPayload, BookSummary, CatalogError};
use crate::server::AppState;
use crate::server::response::ApiResponse;
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

/// Body of a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBook {
    /// ID of the new book.
    pub book_id: String,
}

/// Body of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookList {
    /// Matching books.
    pub books: Vec<BookSummary>,
}

/// Body of a single-book lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDetail {
    /// The book.
    pub book: Book,
}

type JsonBody = std::result::Result<Json<BookPayload>, JsonRejection>;
type QueryPairs = std::result::Result<Query<Vec<(String, String)>>, QueryRejection>;
type BookIdPath = std::result::Result<Path<String>, PathRejection>;

/// Unwrap a JSON body, turning decode failures into a `fail` response.
fn payload(body: JsonBody) -> Result<BookPayload> {
    body.map(|Json(payload)| payload)
        .map_err(|rejection| AppError::InvalidPayload(rejection.body_text()))
}

/// Unwrap the `{book_id}` segment; an undecodable ID names no book.
fn path_id(path: BookIdPath, action: Action) -> Result<String> {
    path.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable book ID");
        AppError::from(CatalogError::NotFound(action))
    })
}

/// Add a book.
pub async fn create_book(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<(StatusCode, ApiResponse<CreatedBook>)> {
    let book_id = state.catalog.create(payload(body)?)?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("Book added successfully", CreatedBook { book_id }),
    ))
}

/// List books, optionally filtered.
pub async fn list_books(
    State(state): State<AppState>,
    query: QueryPairs,
) -> ApiResponse<BookList> {
    let filter = match query {
        Ok(Query(pairs)) => BookFilter::from_pairs(pairs),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Ignoring unreadable query");
            BookFilter::default()
        }
    };

    ApiResponse::data(BookList {
        books: state.catalog.list(&filter),
    })
}

/// Get a single book.
pub async fn get_book(
    State(state): State<AppState>,
    path: BookIdPath,
) -> Result<ApiResponse<BookDetail>> {
    let book_id = path_id(path, Action::Get)?;
    let book = state.catalog.get(&book_id)?;
    tracing::debug!(book_id = %book_id, "Book fetched");
    Ok(ApiResponse::data(BookDetail { book }))
}

/// Replace a book's fields.
pub async fn update_book(
    State(state): State<AppState>,
    path: BookIdPath,
    body: JsonBody,
) -> Result<ApiResponse<()>> {
    let payload = payload(body)?;
    let book_id = path_id(path, Action::Update)?;
    state.catalog.update(&book_id, payload)?;
    Ok(ApiResponse::message("Book updated successfully"))
}

/// Delete a book.
pub async fn delete_book(
    State(state): State<AppState>,
    path: BookIdPath,
) -> Result<ApiResponse<()>> {
    let book_id = path_id(path, Action::Delete)?;
    state.catalog.delete(&book_id)?;
    Ok(ApiResponse::message("Book deleted successfully"))
}

/// Fallback for unknown routes.
pub async fn not_found() -> (StatusCode, ApiResponse<()>) {
    (StatusCode::NOT_FOUND, ApiResponse::fail("Route not found"))
}
