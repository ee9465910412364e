//! Claude API client for rewrite requests.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::ClaudeConfig;

use super::error::{ApiErrorResponse, ClaudeError};
use super::types::{ChatRequest, ChatResponse, Message};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Claude API client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ClaudeClient {
    inner: Arc<ClaudeClientInner>,
}

struct ClaudeClientInner {
    client: reqwest::Client,
    model: String,
    api_url: String,
}

impl ClaudeClient {
    /// Create a new Claude client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key contains invalid header characters
    /// or the HTTP client cannot be built.
    pub fn new(config: &ClaudeConfig) -> Result<Self, ClaudeError> {
        let mut api_key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|_| ClaudeError::InvalidApiKey)?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("x-api-key", api_key);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClaudeClientInner {
                client,
                model: config.model.clone(),
                api_url: config.api_url.clone(),
            }),
        })
    }

    /// Model ID sent with every request.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    /// Send a single-turn request and get the complete response.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, times out or returns an
    /// error response.
    #[instrument(skip(self, system, prompt), fields(model = %self.inner.model))]
    pub async fn chat(
        &self,
        system: Option<String>,
        prompt: String,
    ) -> Result<ChatResponse, ClaudeError> {
        let request = ChatRequest {
            model: self.inner.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            messages: vec![Message::user(prompt)],
            system,
        };

        let response = self
            .inner
            .client
            .post(&self.inner.api_url)
            .json(&request)
            .send()
            .await
            .map_err(ClaudeError::from_transport)?;

        let response = Self::handle_response(response).await?;
        tracing::debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = ?response.stop_reason,
            "Claude response received"
        );
        Ok(response)
    }

    /// Send a single-turn request and return its text.
    ///
    /// # Errors
    ///
    /// Same as [`chat`](Self::chat), plus `ClaudeError::Parse` when the
    /// response carries no text.
    pub async fn complete_text(
        &self,
        system: Option<String>,
        prompt: String,
    ) -> Result<String, ClaudeError> {
        let text = self.chat(system, prompt).await?.text();
        if text.trim().is_empty() {
            return Err(ClaudeError::Parse("response contained no text".to_string()));
        }
        Ok(text)
    }

    /// Handle a response, decoding the body or mapping the error status.
    async fn handle_response(response: reqwest::Response) -> Result<ChatResponse, ClaudeError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await.map_err(ClaudeError::from_transport)?;
            serde_json::from_str(&body)
                .map_err(|e| ClaudeError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(Self::handle_error_status(status, response).await)
        }
    }

    /// Handle an error status code.
    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ClaudeError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return ClaudeError::RateLimited(retry_after);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return ClaudeError::Unauthorized("Invalid API key".to_string());
        }

        match response.text().await {
            Ok(body) => parse_error_body(&body),
            Err(e) => ClaudeError::from_transport(e),
        }
    }
}

/// Map an error response body to a `ClaudeError`.
fn parse_error_body(body: &str) -> ClaudeError {
    serde_json::from_str::<ApiErrorResponse>(body).map_or_else(
        |_| ClaudeError::Api {
            error_type: "unknown".to_string(),
            message: body.to_string(),
        },
        |api_error| ClaudeError::Api {
            error_type: api_error.error.error_type,
            message: api_error.error.message,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn test_parse_error_body_structured() {
        let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        let err = parse_error_body(body);
        assert!(matches!(
            err,
            ClaudeError::Api { ref error_type, ref message }
                if error_type == "overloaded_error" && message == "Overloaded"
        ));
    }

    #[test]
    fn test_parse_error_body_unstructured() {
        let err = parse_error_body("bad gateway");
        assert!(matches!(
            err,
            ClaudeError::Api { ref error_type, ref message }
                if error_type == "unknown" && message == "bad gateway"
        ));
    }

    #[test]
    fn test_new_rejects_unprintable_key() {
        let config = ClaudeConfig::new(SecretString::from("sk-ant\nbroken"));
        assert!(matches!(
            ClaudeClient::new(&config),
            Err(ClaudeError::InvalidApiKey)
        ));
    }

    #[test]
    fn test_new_keeps_model() {
        let config = ClaudeConfig::new(SecretString::from("sk-ant-REDACTED"));
        let client = ClaudeClient::new(&config).expect("client");
        assert_eq!(client.model(), "claude-sonnet-4-20250514");
    }

    #[test]
    fn test_claude_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<ClaudeClient>();
    }
}
