//! HTTP route handlers for storefront.
//!
//! The storefront is a single page whose content is chosen by the page marker
//! in the visitor's session. Every action mutates the session and the result
//! is rendered from it again.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Render the current page
//! GET  /health                 - Health check
//!
//! # Navigation
//! POST /navigate               - Switch page (page=landing|catalog|cart|checkout|contact)
//!
//! # Catalog
//! POST /catalog/filter         - Set category and search filters
//!
//! # Cart
//! POST /cart/add               - Add one unit (product_id)
//! POST /cart/remove            - Remove one unit (product_id)
//! POST /cart/clear             - Empty the cart
//!
//! # Checkout
//! POST /checkout               - Validate delivery details and place the order
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod contact;
pub mod home;
pub mod pages;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Current page
        .route("/", get(pages::current))
        // Page switching
        .route("/navigate", post(pages::navigate))
        // Catalog filters
        .route("/catalog/filter", post(catalog::filter))
        // Cart actions
        .nest("/cart", cart_routes())
        // Order placement
        .route("/checkout", post(checkout::submit))
}
