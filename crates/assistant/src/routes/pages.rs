//! Page router and page templates.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use mercado_core::{AssistantPage, AssistantSession, INITIAL_CREDITS, Tone};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::AssistantContext;
use crate::state::AppState;

/// Navigation form data.
#[derive(Debug, Deserialize)]
pub struct NavigateForm {
    pub page: AssistantPage,
}

/// One-shot message shown above the rewrite form.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: &'static str,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: "success",
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: "warning",
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: "error",
            message: message.into(),
        }
    }
}

/// Tone radio option.
#[derive(Clone)]
pub struct ToneOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub credits: u32,
    pub free_credits: u32,
}

/// Build the landing page for `session`.
#[must_use]
pub const fn landing_page(session: &AssistantSession) -> LandingTemplate {
    LandingTemplate {
        credits: session.credits.remaining(),
        free_credits: INITIAL_CREDITS,
    }
}

/// Rewrite tool template.
#[derive(Template, WebTemplate)]
#[template(path = "app.html")]
pub struct AppTemplate {
    pub credits: u32,
    pub out_of_credits: bool,
    pub can_generate: bool,
    pub draft: String,
    pub tones: Vec<ToneOption>,
    pub result: Option<String>,
    pub notice: Option<Notice>,
}

fn tone_options(current: Tone) -> Vec<ToneOption> {
    Tone::ALL
        .into_iter()
        .map(|tone| ToneOption {
            value: tone.as_param(),
            label: tone.label(),
            selected: tone == current,
        })
        .collect()
}

/// Build the rewrite tool page.
#[must_use]
pub fn app_page(state: &AppState, session: &AssistantSession, notice: Option<Notice>) -> AppTemplate {
    AppTemplate {
        credits: session.credits.remaining(),
        out_of_credits: session.credits.is_exhausted(),
        can_generate: state.generator().is_some(),
        draft: session.draft.clone(),
        tones: tone_options(session.tone),
        result: session.last_result.clone(),
        notice,
    }
}

/// Render whatever page `session` is on.
pub fn render(state: &AppState, session: &AssistantSession) -> Response {
    match session.page {
        AssistantPage::Landing => landing_page(session).into_response(),
        AssistantPage::App => app_page(state, session, None).into_response(),
    }
}

/// Display the current page.
#[instrument(skip_all, fields(page = ctx.data.page.as_param()))]
pub async fn current(State(state): State<AppState>, ctx: AssistantContext) -> Response {
    render(&state, &ctx.data)
}

/// Switch to another page.
#[instrument(skip_all, fields(page = form.page.as_param()))]
pub async fn navigate(
    mut ctx: AssistantContext,
    Form(form): Form<NavigateForm>,
) -> Result<Redirect> {
    ctx.data.page = form.page;
    ctx.save().await?;
    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::AssistantConfig;
    use crate::services::SimulatedPurchase;
    use mercado_core::Credits;

    fn state_without_generator() -> AppState {
        AppState::with_services(
            AssistantConfig::default(),
            None,
            Arc::new(SimulatedPurchase::new(std::time::Duration::ZERO)),
        )
    }

    #[test]
    fn test_app_page_offers_purchase_only_when_exhausted() {
        let state = state_without_generator();

        let session = AssistantSession::default();
        let html = app_page(&state, &session, None).render().expect("render");
        assert!(html.contains("Credits: 3"));
        assert!(!html.contains("action=\"/purchase\""));

        let session = AssistantSession {
            credits: Credits::new(0),
            ..AssistantSession::default()
        };
        let html = app_page(&state, &session, None).render().expect("render");
        assert!(html.contains("Credits: 0"));
        assert!(html.contains("action=\"/purchase\""));
    }

    #[test]
    fn test_app_page_warns_without_generator() {
        let state = state_without_generator();
        let page = app_page(&state, &AssistantSession::default(), None);
        assert!(!page.can_generate);
        let html = page.render().expect("render");
        assert!(html.contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_app_page_shows_result_and_notice() {
        let state = state_without_generator();
        let session = AssistantSession {
            last_result: Some("Rewritten copy".to_string()),
            tone: Tone::Friendly,
            ..AssistantSession::default()
        };
        let html = app_page(&state, &session, Some(Notice::warning("Heads up")))
            .render()
            .expect("render");
        assert!(html.contains("Rewritten copy"));
        assert!(html.contains("notice-warning"));
        assert!(html.contains("value=\"friendly\" checked"));
    }

    #[test]
    fn test_landing_advertises_starting_credits_when_exhausted() {
        let session = AssistantSession {
            credits: Credits::new(0),
            ..AssistantSession::default()
        };
        let html = landing_page(&session).render().expect("render");
        assert!(html.contains("Credits: 0"));
        assert!(html.contains("starts with 3 free rewrites"));
    }
}
