//! Per-request session context.
//!
//! Every handler that reads or changes visitor state takes a [`StoreContext`].
//! It loads the visitor's [`StoreSession`] (creating the default one on first
//! access), lets the handler mutate it, and writes it back on [`save`].
//!
//! [`save`]: StoreContext::save

use axum::{extract::FromRequestParts, http::request::Parts};
use mercado_core::StoreSession;
use tower_sessions::Session;

use crate::error::AppError;

/// Session keys.
pub mod keys {
    /// Key for the storefront session record.
    pub const STORE_SESSION: &str = "store_session";
}

/// The current visitor's storefront state.
pub struct StoreContext {
    handle: Session,
    pub data: StoreSession,
}

impl StoreContext {
    /// Persist changes made to `data` for the next request.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the write.
    pub async fn save(&self) -> Result<(), AppError> {
        self.handle.insert(keys::STORE_SESSION, &self.data).await?;
        Ok(())
    }
}

impl<S> FromRequestParts<S> for StoreContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let handle = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))?;

        let data = handle
            .get::<StoreSession>(keys::STORE_SESSION)
            .await?
            .unwrap_or_default();

        Ok(Self { handle, data })
    }
}
