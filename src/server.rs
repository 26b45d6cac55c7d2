//! HTTP server and routes.

pub(crate) mod handlers;
/// Response envelope.
pub mod response;
mod state;

pub use handlers::{BookDetail, BookList, CreatedBook};
pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route(
            "/books",
            post(handlers::create_book).get(handlers::list_books),
        )
        .route(
            "/books/{book_id}",
            get(handlers::get_book)
                .put(handlers::update_book)
                .delete(handlers::delete_book),
        )
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http());

    let router = if state.config.server.cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}
