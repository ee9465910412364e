//! Application state shared across handlers.

use std::sync::Arc;

use mercado_core::{Product, catalog};

use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It holds only read-only data;
/// everything a visitor changes lives in their session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    products: &'static [Product],
}

impl AppState {
    /// Create application state serving the built-in catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self::with_products(config, catalog())
    }

    /// Create application state serving `products`.
    #[must_use]
    pub fn with_products(config: StorefrontConfig, products: &'static [Product]) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, products }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// The product catalog, shared read-only by every session.
    #[must_use]
    pub fn products(&self) -> &'static [Product] {
        self.inner.products
    }
}
