//! Page router.
//!
//! Maps the session's page marker to a renderer. Cart and checkout need
//! something in the cart; with an empty cart they show a notice with a way
//! back to the catalog instead of switching pages on their own.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use mercado_core::{StorePage, StoreSession};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::StoreContext;
use crate::state::AppState;

use super::{cart, catalog, checkout, contact, home};

/// Navigation form data.
#[derive(Debug, Deserialize)]
pub struct NavigateForm {
    pub page: StorePage,
}

/// Shown instead of cart or checkout when the cart is empty.
#[derive(Template, WebTemplate)]
#[template(path = "empty_cart.html")]
pub struct EmptyCartTemplate {
    pub cart_count: u32,
    pub heading: &'static str,
    pub message: &'static str,
    pub level: &'static str,
}

fn empty_cart(page: StorePage) -> EmptyCartTemplate {
    let (heading, message, level) = match page {
        StorePage::Checkout => ("✅ Finalizar Compra", "Tu carrito está vacío.", "warning"),
        _ => (
            "🛒 Tu Carrito",
            "Tu carrito está vacío. ¡Agrega algunos productos!",
            "info",
        ),
    };
    EmptyCartTemplate {
        cart_count: 0,
        heading,
        message,
        level,
    }
}

/// Render whatever page `session` is on.
pub fn render(state: &AppState, session: &StoreSession) -> Response {
    let products = state.products();
    match session.page {
        StorePage::Landing => home::page(products).into_response(),
        StorePage::Catalog => catalog::page(products, session).into_response(),
        page if page.requires_items() && session.cart.is_empty() => {
            empty_cart(page).into_response()
        }
        StorePage::Cart => cart::page(products, session).into_response(),
        StorePage::Checkout => checkout::page(products, session).into_response(),
        StorePage::Contact => contact::page(session).into_response(),
    }
}

/// Display the current page.
#[instrument(skip_all, fields(page = ctx.data.page.as_param()))]
pub async fn current(State(state): State<AppState>, ctx: StoreContext) -> Response {
    render(&state, &ctx.data)
}

/// Switch to another page.
#[instrument(skip_all, fields(page = form.page.as_param()))]
pub async fn navigate(mut ctx: StoreContext, Form(form): Form<NavigateForm>) -> Result<Redirect> {
    tracing::debug!(from = ctx.data.page.as_param(), "Navigating");
    ctx.data.page = form.page;
    ctx.save().await?;
    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cart_notice_per_page() {
        let notice = empty_cart(StorePage::Checkout);
        assert_eq!(notice.level, "warning");
        assert_eq!(notice.message, "Tu carrito está vacío.");

        let notice = empty_cart(StorePage::Cart);
        assert_eq!(notice.level, "info");
    }

    #[test]
    fn test_empty_cart_template_links_back_to_catalog() {
        let html = empty_cart(StorePage::Cart).render().expect("render");
        assert!(html.contains("value=\"catalog\""));
        assert!(html.contains("Volver al catálogo"));
    }
}
