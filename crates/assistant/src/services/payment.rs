//! Credit purchases.
//!
//! There is no payment provider. [`SimulatedPurchase`] waits for a moment
//! and then always succeeds.

use std::time::Duration;

use async_trait::async_trait;
use mercado_core::AssistantSession;
use thiserror::Error;
use tracing::instrument;

/// Failure to take payment.
#[derive(Debug, Error)]
pub enum PurchaseError {
    #[error("payment declined: {0}")]
    Declined(String),
}

/// Something that takes payment for a credit refill.
#[async_trait]
pub trait CreditPurchase: Send + Sync {
    /// Charge for one refill.
    async fn purchase(&self) -> Result<(), PurchaseError>;
}

/// Stand-in purchase that sleeps for `delay` and succeeds.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedPurchase {
    delay: Duration,
}

impl SimulatedPurchase {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl CreditPurchase for SimulatedPurchase {
    async fn purchase(&self) -> Result<(), PurchaseError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// Pay for a refill and set the session's credits to the purchase grant.
///
/// Allowed whatever the current balance is.
///
/// # Errors
///
/// Returns the purchaser's error; credits are unchanged in that case.
#[instrument(skip_all, fields(before = session.credits.remaining()))]
pub async fn buy_credits(
    session: &mut AssistantSession,
    purchaser: &dyn CreditPurchase,
) -> Result<(), PurchaseError> {
    purchaser.purchase().await?;
    session.credits.refill();
    tracing::info!(credits = session.credits.remaining(), "Credits purchased");
    Ok(())
}
