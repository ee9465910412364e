//! HTTP route handlers for the assistant.
//!
//! # Route Structure
//!
//! ```text
//! GET  /            - Render the current page
//! GET  /health      - Health check
//! POST /navigate    - Switch page (page=landing|app)
//! POST /generate    - Rewrite a draft (draft, tone), spends one credit
//! POST /purchase    - Buy a credit refill
//! ```

pub mod credits;
pub mod pages;
pub mod rewrite;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the assistant.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::current))
        .route("/navigate", post(pages::navigate))
        .route("/generate", post(rewrite::generate))
        .route("/purchase", post(credits::purchase))
}
