//! Session middleware configuration.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::AssistantConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "ra_session";

/// Session expiry time in seconds (24 hours of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer backed by an in-memory store.
///
/// Credits live only in memory, so a restart hands everyone a fresh three.
#[must_use]
pub fn create_session_layer(config: &AssistantConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
