//! Current-view selectors for both apps.
//!
//! Each session holds one of these. It changes only through explicit
//! navigation actions; there are no automatic transitions.

use serde::{Deserialize, Serialize};

/// Storefront views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorePage {
    #[default]
    Landing,
    Catalog,
    Cart,
    Checkout,
    Contact,
}

impl StorePage {
    /// Form value used by navigation buttons.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Catalog => "catalog",
            Self::Cart => "cart",
            Self::Checkout => "checkout",
            Self::Contact => "contact",
        }
    }

    /// Whether the page needs a non-empty cart to show its content.
    #[must_use]
    pub const fn requires_items(self) -> bool {
        matches!(self, Self::Cart | Self::Checkout)
    }
}

/// Assistant views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistantPage {
    #[default]
    Landing,
    App,
}

impl AssistantPage {
    /// Form value used by navigation buttons.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::App => "app",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_pages_are_landing() {
        assert_eq!(StorePage::default(), StorePage::Landing);
        assert_eq!(AssistantPage::default(), AssistantPage::Landing);
    }

    #[test]
    fn test_page_serde_matches_param() {
        for page in [
            StorePage::Landing,
            StorePage::Catalog,
            StorePage::Cart,
            StorePage::Checkout,
            StorePage::Contact,
        ] {
            let json = serde_json::to_string(&page).expect("serialize");
            assert_eq!(json, format!("\"{}\"", page.as_param()));
        }
        assert_eq!(
            serde_json::to_string(&AssistantPage::App).expect("serialize"),
            "\"app\""
        );
    }

    #[test]
    fn test_guarded_pages() {
        assert!(StorePage::Cart.requires_items());
        assert!(StorePage::Checkout.requires_items());
        assert!(!StorePage::Catalog.requires_items());
    }
}
