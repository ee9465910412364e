//! Checkout page and order placement.
//!
//! Orders are not stored: a successful submission shows a confirmation and
//! empties the cart. A submission with blank required fields re-renders the
//! form with the entered values and leaves the session untouched.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mercado_core::{
    CheckoutError, CheckoutForm, OrderConfirmation, PaymentMethod, Product, StoreSession,
    place_order,
};
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::middleware::StoreContext;
use crate::state::AppState;

use super::cart::CartView;
use super::pages;

/// Payment method radio option.
#[derive(Clone)]
pub struct PaymentOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Confirmation display data.
#[derive(Clone)]
pub struct ConfirmationView {
    pub name: String,
    pub total: String,
    pub phone: String,
    pub address: String,
    pub payment: &'static str,
    pub email: Option<String>,
    pub notes: Option<String>,
}

impl From<OrderConfirmation> for ConfirmationView {
    fn from(order: OrderConfirmation) -> Self {
        Self {
            name: order.name,
            total: order.total.to_string(),
            phone: order.phone,
            address: order.address,
            payment: order.payment.label(),
            email: order.email,
            notes: order.notes,
        }
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub cart_count: u32,
    pub cart: CartView,
    pub form: CheckoutForm,
    pub payments: Vec<PaymentOption>,
    pub error: Option<String>,
    pub confirmation: Option<ConfirmationView>,
}

fn payment_options(current: PaymentMethod) -> Vec<PaymentOption> {
    PaymentMethod::ALL
        .into_iter()
        .map(|method| PaymentOption {
            value: method.as_param(),
            label: method.label(),
            selected: method == current,
        })
        .collect()
}

fn form_page(
    products: &[Product],
    session: &StoreSession,
    form: CheckoutForm,
    error: Option<String>,
) -> CheckoutTemplate {
    let cart = CartView::build(&session.cart, products);
    CheckoutTemplate {
        cart_count: cart.item_count,
        cart,
        payments: payment_options(form.payment),
        form,
        error,
        confirmation: None,
    }
}

fn confirmation_page(order: OrderConfirmation) -> CheckoutTemplate {
    CheckoutTemplate {
        cart_count: 0,
        cart: CartView::build(&mercado_core::Cart::new(), &[]),
        form: CheckoutForm::default(),
        payments: Vec::new(),
        error: None,
        confirmation: Some(ConfirmationView::from(order)),
    }
}

/// Build the checkout page with an empty form.
#[must_use]
pub fn page(products: &[Product], session: &StoreSession) -> CheckoutTemplate {
    form_page(products, session, CheckoutForm::default(), None)
}

/// Validate delivery details and place the order.
#[instrument(skip_all, fields(payment = form.payment.as_param()))]
pub async fn submit(
    State(state): State<AppState>,
    mut ctx: StoreContext,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    match place_order(&mut ctx.data.cart, state.products(), &form) {
        Ok(order) => {
            ctx.save().await?;
            tracing::info!(
                total = order.total.pesos(),
                items = order.item_count,
                payment = order.payment.as_param(),
                "Order placed"
            );
            add_breadcrumb("checkout", "Order placed", None);
            Ok(confirmation_page(order).into_response())
        }
        Err(CheckoutError::EmptyCart) => {
            tracing::debug!("Checkout submitted with an empty cart");
            Ok(pages::render(&state, &ctx.data))
        }
        Err(err @ CheckoutError::MissingFields(_)) => {
            tracing::debug!(error = ?err, "Checkout rejected");
            let page = form_page(state.products(), &ctx.data, form, Some(err.to_string()));
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
    }
}
