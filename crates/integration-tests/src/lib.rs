//! Integration test harness for Mercado Justo.
//!
//! Each test starts the real routers in-process on `127.0.0.1:0` and talks
//! to them over HTTP with a cookie-keeping client, so sessions behave as
//! they would in a browser. Nothing external is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mercado-integration-tests
//! ```

use std::net::SocketAddr;

use axum::Router;
use reqwest::Client;
use tokio::task::JoinHandle;

/// A router served on an ephemeral local port for the lifetime of the value.
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Serve `router` on a fresh local port.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn spawn(router: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Test server error");
        });

        Self { addr, handle }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A new browser-like client with its own cookie jar, i.e. its own session.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built.
#[must_use]
pub fn browser() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}
