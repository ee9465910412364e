//! Mercado Justo Core - Shared domain library.
//!
//! This crate provides the domain model used by both web binaries:
//! - `storefront` - Produce catalog, cart and checkout
//! - `assistant` - Credit-metered text rewriting
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no
//! HTTP, no session storage. The web crates load a session record, call
//! into this crate to mutate it, store it back and re-render.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids and prices
//! - [`catalog`] - Static product list and filtering
//! - [`cart`] - Cart arithmetic
//! - [`checkout`] - Form validation and order placement
//! - [`credits`] - Generation credits and tones
//! - [`page`] - Page selectors
//! - [`session`] - Per-session records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod credits;
pub mod page;
pub mod session;
pub mod types;

pub use cart::{Cart, CartLine, ResolvedLine};
pub use catalog::{Category, CategoryFilter, CatalogFilter, Product, catalog, find_product};
pub use checkout::{CheckoutError, CheckoutForm, OrderConfirmation, PaymentMethod, place_order};
pub use credits::{Credits, CreditsError, INITIAL_CREDITS, Tone};
pub use page::{AssistantPage, StorePage};
pub use session::{AssistantSession, StoreSession};
pub use types::*;
