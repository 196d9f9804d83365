//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::CatalogConfig;
use crate::services::ProductCatalogService;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: CatalogConfig,
    catalog: ProductCatalogService,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: CatalogConfig, catalog: ProductCatalogService) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Get a reference to the catalog configuration.
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog service.
    #[must_use]
    pub fn catalog(&self) -> &ProductCatalogService {
        &self.inner.catalog
    }
}
