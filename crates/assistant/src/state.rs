//! Application state shared across handlers.

use std::sync::Arc;

use crate::claude::ClaudeClient;
use crate::config::AssistantConfig;
use crate::services::{CreditPurchase, SimulatedPurchase, TextGenerator};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Credits and results are per visitor and
/// live in the session, not here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AssistantConfig,
    generator: Option<Arc<dyn TextGenerator>>,
    purchaser: Arc<dyn CreditPurchase>,
}

impl AppState {
    /// Create application state with the Claude client and the simulated
    /// purchase.
    ///
    /// Without Claude configuration, or when the client cannot be built
    /// from it, the generator is absent and rewriting is disabled.
    #[must_use]
    pub fn new(config: AssistantConfig) -> Self {
        let generator = config.claude.as_ref().and_then(|claude| {
            match ClaudeClient::new(claude) {
                Ok(client) => {
                    tracing::info!(model = client.model(), "Claude client ready");
                    Some(Arc::new(client) as Arc<dyn TextGenerator>)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Claude client unavailable, rewriting disabled");
                    None
                }
            }
        });
        let purchaser = Arc::new(SimulatedPurchase::new(config.purchase_delay));

        Self::with_services(config, generator, purchaser)
    }

    /// Create application state from explicit collaborators.
    #[must_use]
    pub fn with_services(
        config: AssistantConfig,
        generator: Option<Arc<dyn TextGenerator>>,
        purchaser: Arc<dyn CreditPurchase>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                generator,
                purchaser,
            }),
        }
    }

    /// Get a reference to the assistant configuration.
    #[must_use]
    pub fn config(&self) -> &AssistantConfig {
        &self.inner.config
    }

    /// The text generator, if one is configured.
    #[must_use]
    pub fn generator(&self) -> Option<&dyn TextGenerator> {
        self.inner.generator.as_deref()
    }

    /// The credit purchase collaborator.
    #[must_use]
    pub fn purchaser(&self) -> &dyn CreditPurchase {
        self.inner.purchaser.as_ref()
    }
}
