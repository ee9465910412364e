//! Business logic behind the assistant's actions.
//!
//! External collaborators sit behind traits so the web layer and the tests
//! can swap them:
//! - [`generator::TextGenerator`] - produces the rewritten text
//! - [`payment::CreditPurchase`] - takes payment for more credits

pub mod generator;
pub mod payment;
pub mod rewrite;

pub use generator::{GenerateError, GenerationRequest, TextGenerator};
pub use payment::{CreditPurchase, PurchaseError, SimulatedPurchase, buy_credits};
pub use rewrite::{RewriteError, rewrite};
