//! Application state shared across handlers.

use crate::config::Config;
use crate::library::Catalog;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Book catalog.
    pub catalog: Arc<Catalog>,
}

impl AppState {
    /// Create state with an empty catalog configured from `config`.
    pub fn new(config: Config) -> Self {
        let catalog = Catalog::new(config.catalog.unfiltered_listing);
        Self::with_catalog(config, catalog)
    }

    /// Create state around an existing catalog.
    pub fn with_catalog(config: Config, catalog: Catalog) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
        }
    }
}
