//! In-memory book catalog.

/// Book record model.
pub mod book;
mod catalog;
mod source;

pub use book::{Book, BookFilter, BookPayload, BookSummary};
pub use catalog::{Action, Catalog, CatalogError, UnfilteredListing};
pub use source::{Clock, IdGenerator, SystemClock, UuidGenerator};
