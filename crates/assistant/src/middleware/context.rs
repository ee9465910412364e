//! Per-request session context.

use axum::{extract::FromRequestParts, http::request::Parts};
use mercado_core::AssistantSession;
use tower_sessions::Session;

use crate::error::AppError;

/// Session keys.
pub mod keys {
    /// Key for the assistant session record.
    pub const ASSISTANT_SESSION: &str = "assistant_session";
}

/// The current visitor's assistant state: page, credits, last result.
///
/// Loaded with defaults on first access. Changes to `data` are kept only
/// after [`save`](Self::save).
pub struct AssistantContext {
    handle: Session,
    pub data: AssistantSession,
}

impl AssistantContext {
    /// Persist changes made to `data` for the next request.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the write.
    pub async fn save(&self) -> Result<(), AppError> {
        self.handle
            .insert(keys::ASSISTANT_SESSION, &self.data)
            .await?;
        Ok(())
    }
}

impl<S> FromRequestParts<S> for AssistantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let handle = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))?;

        let data = handle
            .get::<AssistantSession>(keys::ASSISTANT_SESSION)
            .await?
            .unwrap_or_default();

        Ok(Self { handle, data })
    }
}
