//! Cart page and cart actions.
//!
//! Cart state lives in the visitor's session. Each action changes it by one
//! step and redirects back to the current page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, response::Redirect};
use mercado_core::{Cart, Product, ProductId, ResolvedLine, StoreSession};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::middleware::StoreContext;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct LineView {
    pub id: i32,
    pub name: &'static str,
    pub emoji: &'static str,
    pub price: String,
    pub unit: &'static str,
    pub quantity: u32,
    pub subtotal: String,
}

impl From<ResolvedLine<'_>> for LineView {
    fn from(line: ResolvedLine<'_>) -> Self {
        Self {
            id: line.product.id.as_i32(),
            name: line.product.name,
            emoji: line.product.emoji,
            price: line.product.price.to_string(),
            unit: line.product.unit,
            quantity: line.quantity,
            subtotal: line.subtotal.to_string(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<LineView>,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// Resolve `cart` against `products` for display.
    #[must_use]
    pub fn build(cart: &Cart, products: &[Product]) -> Self {
        Self {
            lines: cart.resolve(products).map(LineView::from).collect(),
            total: cart.total(products).to_string(),
            item_count: cart.count(),
        }
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub cart_count: u32,
    pub cart: CartView,
}

/// Product selection form data.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_id: ProductId,
}

/// Build the cart page.
#[must_use]
pub fn page(products: &[Product], session: &StoreSession) -> CartTemplate {
    let cart = CartView::build(&session.cart, products);
    CartTemplate {
        cart_count: cart.item_count,
        cart,
    }
}

/// Add one unit of a product.
#[instrument(skip_all, fields(product_id = %form.product_id))]
pub async fn add(mut ctx: StoreContext, Form(form): Form<ProductForm>) -> Result<Redirect> {
    ctx.data.cart.add(form.product_id);
    ctx.save().await?;

    let id = form.product_id.to_string();
    add_breadcrumb("cart", "Added product", Some(&[("product_id", id.as_str())][..]));
    tracing::debug!(count = ctx.data.cart.count(), "Cart updated");

    Ok(Redirect::to("/"))
}

/// Remove one unit of a product.
#[instrument(skip_all, fields(product_id = %form.product_id))]
pub async fn remove(mut ctx: StoreContext, Form(form): Form<ProductForm>) -> Result<Redirect> {
    ctx.data.cart.remove(form.product_id);
    ctx.save().await?;

    let id = form.product_id.to_string();
    add_breadcrumb("cart", "Removed product", Some(&[("product_id", id.as_str())][..]));
    tracing::debug!(count = ctx.data.cart.count(), "Cart updated");

    Ok(Redirect::to("/"))
}

/// Empty the cart.
#[instrument(skip_all)]
pub async fn clear(mut ctx: StoreContext) -> Result<Redirect> {
    ctx.data.cart.clear();
    ctx.save().await?;

    add_breadcrumb("cart", "Cleared cart", None);

    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mercado_core::catalog;

    #[test]
    fn test_cart_view_formats_lines_and_total() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1));
        cart.add(ProductId::new(1));
        cart.add(ProductId::new(11));

        let view = CartView::build(&cart, catalog());
        assert_eq!(view.item_count, 3);
        assert_eq!(view.total, "$7.500");

        let apple = view.lines.first().expect("apple line");
        assert_eq!(apple.name, "Manzana Roja");
        assert_eq!(apple.quantity, 2);
        assert_eq!(apple.subtotal, "$5.000");
    }

    #[test]
    fn test_cart_view_skips_unknown_products() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(500));
        cart.add(ProductId::new(20));

        let view = CartView::build(&cart, catalog());
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.total, "$8.000");
    }

    #[test]
    fn test_cart_page_renders_actions() {
        let mut session = StoreSession::default();
        session.cart.add(ProductId::new(13));

        let html = page(catalog(), &session).render().expect("render");
        assert!(html.contains("Zanahoria"));
        assert!(html.contains("action=\"/cart/remove\""));
        assert!(html.contains("action=\"/cart/clear\""));
        assert!(html.contains("Total: $1.800"));
    }
}
