//! Text generation collaborator.

use async_trait::async_trait;
use thiserror::Error;

use crate::claude::{ClaudeClient, ClaudeError};

/// One rewrite request: how to rewrite, and what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// System instruction selecting the tone.
    pub system: String,
    /// The user's draft, already trimmed.
    pub draft: String,
}

/// Failure of the generation collaborator.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Claude(#[from] ClaudeError),

    #[error("{0}")]
    Failed(String),
}

/// Something that turns a draft into rewritten text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Produce the rewritten text for `request`.
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerateError>;
}

#[async_trait]
impl TextGenerator for ClaudeClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerateError> {
        Ok(self
            .complete_text(Some(request.system), request.draft)
            .await?)
    }
}
