//! Contact page.

use askama::Template;
use askama_web::WebTemplate;
use mercado_core::StoreSession;

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub cart_count: u32,
}

/// Build the contact page.
#[must_use]
pub fn page(session: &StoreSession) -> ContactTemplate {
    ContactTemplate {
        cart_count: session.cart.count(),
    }
}
