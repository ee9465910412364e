//! The credit-metered rewrite operation.
//!
//! A rewrite spends exactly one credit, and only when the generator
//! returns text. Anything that stops a rewrite, from an empty balance to a
//! failed call, leaves the credits and the last result as they were.

use mercado_core::{AssistantSession, Tone};
use thiserror::Error;
use tracing::instrument;

use super::generator::{GenerateError, GenerationRequest, TextGenerator};

/// Longest draft accepted, in characters.
pub const MAX_DRAFT_CHARS: usize = 10_000;

/// Why a rewrite did not happen.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("You're out of credits. Buy more to keep rewriting.")]
    OutOfCredits,

    #[error("Please enter some text to rewrite.")]
    EmptyDraft,

    #[error("Your draft is too long. Keep it under 10,000 characters.")]
    DraftTooLong,

    #[error("Rewriting is not available: no API key is configured.")]
    Unavailable,

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerateError),
}

/// Rewrite `draft` in `tone` and store the result in `session`.
///
/// The submitted draft and tone are always kept in the session so the form
/// can be shown again as the user left it. The generator is called at most
/// once.
///
/// # Errors
///
/// See [`RewriteError`]. On any error the credits and the last result are
/// unchanged.
#[instrument(skip_all, fields(tone = tone.as_param(), credits = session.credits.remaining()))]
pub async fn rewrite(
    session: &mut AssistantSession,
    generator: Option<&dyn TextGenerator>,
    draft: &str,
    tone: Tone,
) -> Result<(), RewriteError> {
    session.draft = draft.to_string();
    session.tone = tone;

    if session.credits.is_exhausted() {
        return Err(RewriteError::OutOfCredits);
    }

    let draft = draft.trim();
    if draft.is_empty() {
        return Err(RewriteError::EmptyDraft);
    }
    if draft.chars().count() > MAX_DRAFT_CHARS {
        return Err(RewriteError::DraftTooLong);
    }

    let generator = generator.ok_or(RewriteError::Unavailable)?;

    let request = GenerationRequest {
        system: tone.system_instruction(),
        draft: draft.to_string(),
    };
    let text = generator.generate(request).await.inspect_err(|e| {
        tracing::warn!(error = %e, "Generation failed");
    })?;

    session
        .credits
        .consume_one()
        .map_err(|_| RewriteError::OutOfCredits)?;
    session.last_result = Some(text);

    tracing::info!(remaining = session.credits.remaining(), "Rewrite completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use async_trait::async_trait;
    use mercado_core::Credits;

    /// Records requests and answers with a fixed result.
    struct Recorder {
        reply: Result<String, String>,
        calls: Mutex<Vec<GenerationRequest>>,
    }

    impl Recorder {
        fn ok(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<GenerationRequest> {
            self.calls.lock().expect("lock").clone()
        }
    }

    #[async_trait]
    impl TextGenerator for Recorder {
        async fn generate(&self, request: GenerationRequest) -> Result<String, GenerateError> {
            self.calls.lock().expect("lock").push(request);
            self.reply.clone().map_err(GenerateError::Failed)
        }
    }

    #[tokio::test]
    async fn test_three_rewrites_then_blocked() {
        let generator = Recorder::ok("Polished text.");
        let mut session = AssistantSession::default();

        for expected in [2, 1, 0] {
            rewrite(&mut session, Some(&generator), "draft", Tone::Friendly)
                .await
                .expect("rewrite");
            assert_eq!(session.credits.remaining(), expected);
        }

        let err = rewrite(&mut session, Some(&generator), "draft", Tone::Friendly)
            .await
            .expect_err("blocked");
        assert!(matches!(err, RewriteError::OutOfCredits));
        assert_eq!(generator.calls().len(), 3);
        assert_eq!(session.credits.remaining(), 0);
    }

    #[tokio::test]
    async fn test_success_stores_result_and_sends_tone_instruction() {
        let generator = Recorder::ok("Dear team, ...");
        let mut session = AssistantSession::default();

        rewrite(&mut session, Some(&generator), "  hey team  ", Tone::Persuasive)
            .await
            .expect("rewrite");

        assert_eq!(session.last_result.as_deref(), Some("Dear team, ..."));
        assert_eq!(session.draft, "  hey team  ");
        assert_eq!(session.tone, Tone::Persuasive);

        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        let call = calls.first().expect("one call");
        assert_eq!(call.draft, "hey team");
        assert_eq!(call.system, Tone::Persuasive.system_instruction());
    }

    #[tokio::test]
    async fn test_blank_draft_makes_no_call() {
        let generator = Recorder::ok("unused");
        let mut session = AssistantSession::default();

        let err = rewrite(&mut session, Some(&generator), " \n\t ", Tone::Professional)
            .await
            .expect_err("blank");
        assert!(matches!(err, RewriteError::EmptyDraft));
        assert!(generator.calls().is_empty());
        assert_eq!(session.credits.remaining(), 3);
    }

    #[tokio::test]
    async fn test_failure_keeps_credits_and_previous_result() {
        let generator = Recorder::failing("upstream exploded");
        let mut session = AssistantSession {
            credits: Credits::new(2),
            last_result: Some("earlier".to_string()),
            ..AssistantSession::default()
        };

        let err = rewrite(&mut session, Some(&generator), "draft", Tone::Professional)
            .await
            .expect_err("failure");
        assert_eq!(err.to_string(), "Generation failed: upstream exploded");
        assert_eq!(session.credits.remaining(), 2);
        assert_eq!(session.last_result.as_deref(), Some("earlier"));
    }

    #[tokio::test]
    async fn test_missing_generator() {
        let mut session = AssistantSession::default();
        let err = rewrite(&mut session, None, "draft", Tone::Professional)
            .await
            .expect_err("unavailable");
        assert!(matches!(err, RewriteError::Unavailable));
        assert_eq!(session.credits.remaining(), 3);
    }

    #[tokio::test]
    async fn test_overlong_draft_is_rejected_without_a_call() {
        let generator = Recorder::ok("unused");
        let mut session = AssistantSession::default();
        let draft = "a".repeat(MAX_DRAFT_CHARS + 1);

        let err = rewrite(&mut session, Some(&generator), &draft, Tone::Friendly)
            .await
            .expect_err("too long");
        assert!(matches!(err, RewriteError::DraftTooLong));
        assert!(generator.calls().is_empty());
        assert_eq!(session.credits.remaining(), 3);
        assert_eq!(session.draft, draft);

        let draft = "é".repeat(MAX_DRAFT_CHARS);
        rewrite(&mut session, Some(&generator), &draft, Tone::Friendly)
            .await
            .expect("at the limit");
        assert_eq!(session.credits.remaining(), 2);
    }
}
