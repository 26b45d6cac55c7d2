//! bookshelf-rs: A small in-memory bookshelf catalog served over HTTP.
//!
//! Clients add, list, fetch, update and delete book records. Records live
//! in process memory and are lost on restart.
//!
//! # Features
//!
//! - JSON API with a uniform `{status, message, data}` envelope
//! - Listing filters by name word, reading flag or finished flag
//! - Derived `finished` flag and page count validation
//! - Injectable clock and ID generator

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Configuration and CLI.
pub mod config;
/// Error types.
pub mod error;
/// Book catalog.
pub mod library;
/// HTTP server.
pub mod server;


pub use config::{Cli, Command, Config};
pub use error::{AppError, Result};
pub use library::Catalog;
pub use server::AppState;
