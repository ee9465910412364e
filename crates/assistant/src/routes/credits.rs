//! Credit purchase action.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::middleware::AssistantContext;
use crate::services::buy_credits;
use crate::state::AppState;

use super::pages::{Notice, app_page};

/// Buy a refill. Succeeds whatever the current balance is.
#[instrument(skip_all)]
pub async fn purchase(State(state): State<AppState>, mut ctx: AssistantContext) -> Result<Response> {
    match buy_credits(&mut ctx.data, state.purchaser()).await {
        Ok(()) => {
            ctx.save().await?;
            add_breadcrumb("credits", "Credits purchased");
            let notice = Notice::success(format!(
                "Purchase complete. You now have {} credits.",
                ctx.data.credits
            ));
            Ok(app_page(&state, &ctx.data, Some(notice)).into_response())
        }
        Err(err) => {
            tracing::warn!(error = %err, "Credit purchase failed");
            let notice = Notice::error(err.to_string());
            Ok((
                StatusCode::PAYMENT_REQUIRED,
                app_page(&state, &ctx.data, Some(notice)),
            )
                .into_response())
        }
    }
}
