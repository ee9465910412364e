//! Rewrite action.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mercado_core::Tone;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::middleware::AssistantContext;
use crate::services::{RewriteError, rewrite};
use crate::state::AppState;

use super::pages::{Notice, app_page};

/// Rewrite form data.
#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub draft: String,
    #[serde(default)]
    pub tone: Tone,
}

/// Rewrite the submitted draft, spending one credit on success.
#[instrument(skip_all, fields(tone = form.tone.as_param()))]
pub async fn generate(
    State(state): State<AppState>,
    mut ctx: AssistantContext,
    Form(form): Form<GenerateForm>,
) -> Result<Response> {
    let outcome = rewrite(&mut ctx.data, state.generator(), &form.draft, form.tone).await;
    ctx.save().await?;

    let (status, notice) = match outcome {
        Ok(()) => {
            add_breadcrumb("rewrite", "Rewrite completed");
            let left = ctx.data.credits.remaining();
            (
                StatusCode::OK,
                Notice::success(format!("Done! {left} credits left.")),
            )
        }
        Err(err @ (RewriteError::EmptyDraft | RewriteError::DraftTooLong)) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Notice::warning(err.to_string()))
        }
        Err(err @ RewriteError::OutOfCredits) => {
            (StatusCode::PAYMENT_REQUIRED, Notice::warning(err.to_string()))
        }
        Err(err @ RewriteError::Unavailable) => {
            (StatusCode::SERVICE_UNAVAILABLE, Notice::warning(err.to_string()))
        }
        Err(err @ RewriteError::Generation(_)) => {
            (StatusCode::BAD_GATEWAY, Notice::error(err.to_string()))
        }
    };

    Ok((status, app_page(&state, &ctx.data, Some(notice))).into_response())
}
