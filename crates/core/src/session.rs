//! Per-session records.
//!
//! One record per visitor, created with defaults on first access and
//! stored by the web layer between requests. Nothing here is shared
//! between sessions.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::catalog::CatalogFilter;
use crate::credits::{Credits, Tone};
use crate::page::{AssistantPage, StorePage};

/// Storefront session state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSession {
    pub page: StorePage,
    pub cart: Cart,
    pub filter: CatalogFilter,
}

/// Rewrite assistant session state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantSession {
    pub page: AssistantPage,
    pub credits: Credits,
    /// Most recent rewrite, replaced by each successful generation.
    pub last_result: Option<String>,
    /// Draft text as last submitted, kept so the form is refilled.
    pub draft: String,
    pub tone: Tone,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_session_defaults() {
        let session = StoreSession::default();
        assert_eq!(session.page, StorePage::Landing);
        assert!(session.cart.is_empty());
        assert_eq!(session.filter, CatalogFilter::default());
    }

    #[test]
    fn test_assistant_session_defaults() {
        let session = AssistantSession::default();
        assert_eq!(session.page, AssistantPage::Landing);
        assert_eq!(session.credits.remaining(), 3);
        assert!(session.last_result.is_none());
    }

    #[test]
    fn test_sessions_survive_json_round_trip() {
        let mut store = StoreSession::default();
        store.page = StorePage::Cart;
        store.cart.add(crate::ProductId::new(3));
        let value = serde_json::to_value(&store).expect("serialize");
        assert_eq!(
            serde_json::from_value::<StoreSession>(value).expect("deserialize"),
            store
        );

        let assistant = AssistantSession {
            last_result: Some("Hola".to_string()),
            ..AssistantSession::default()
        };
        let value = serde_json::to_value(&assistant).expect("serialize");
        assert_eq!(
            serde_json::from_value::<AssistantSession>(value).expect("deserialize"),
            assistant
        );
    }
}
