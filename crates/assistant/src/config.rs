//! Assistant configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `ASSISTANT_HOST` - Bind address (default: 127.0.0.1)
//! - `ASSISTANT_PORT` - Listen port (default: 3001)
//! - `ASSISTANT_BASE_URL` - Public URL (default: `http://localhost:3001`)
//! - `ANTHROPIC_API_KEY` - Claude API key; without a usable key the rewrite
//!   action is disabled
//! - `ANTHROPIC_MODEL` - Model ID (default: claude-sonnet-4-20250514)
//! - `ANTHROPIC_API_URL` - Messages endpoint (default: Anthropic's public API)
//! - `ANTHROPIC_TIMEOUT_SECS` - Request timeout (default: 30)
//! - `PURCHASE_DELAY_MS` - Simulated payment processing time (default: 1500)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate, 0.0 to 1.0 (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_CLAUDE_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_CLAUDE_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "xxx",
    "todo",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),

    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Assistant application configuration.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the assistant
    pub base_url: String,
    /// Emit JSON logs instead of text
    pub json_logs: bool,
    /// Claude API configuration, `None` when no usable key is set
    pub claude: Option<ClaudeConfig>,
    /// How long the simulated credit purchase takes
    pub purchase_delay: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Claude AI API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct ClaudeConfig {
    /// Anthropic API key
    pub api_key: SecretString,
    /// Model ID (e.g., claude-sonnet-4-20250514)
    pub model: String,
    /// Messages API endpoint
    pub api_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for ClaudeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaudeConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClaudeConfig {
    /// Configuration for `api_key` with every other setting at its default.
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            model: DEFAULT_CLAUDE_MODEL.to_string(),
            api_url: DEFAULT_CLAUDE_API_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Load Claude configuration from environment.
    ///
    /// Returns `None` if `ANTHROPIC_API_KEY` is unset or looks like a
    /// placeholder (rewriting disabled).
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(key) = get_optional_env("ANTHROPIC_API_KEY") else {
            tracing::warn!("ANTHROPIC_API_KEY not set, rewriting disabled");
            return Ok(None);
        };

        if let Err(e) = validate_secret_strength(&key, "ANTHROPIC_API_KEY") {
            tracing::warn!("ANTHROPIC_API_KEY rejected, rewriting disabled: {e}");
            return Ok(None);
        }

        let timeout_secs = parse_env_or_default::<u64>("ANTHROPIC_TIMEOUT_SECS", "30")?;

        Ok(Some(Self {
            api_key: SecretString::from(key),
            model: get_env_or_default("ANTHROPIC_MODEL", DEFAULT_CLAUDE_MODEL),
            api_url: get_env_or_default("ANTHROPIC_API_URL", DEFAULT_CLAUDE_API_URL),
            timeout: Duration::from_secs(timeout_secs),
        }))
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3001,
            base_url: "http://localhost:3001".to_string(),
            json_logs: false,
            claude: None,
            purchase_delay: Duration::from_millis(1500),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl AssistantConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let delay_ms = parse_env_or_default::<u64>("PURCHASE_DELAY_MS", "1500")?;

        Ok(Self {
            host: parse_env_or_default::<IpAddr>("ASSISTANT_HOST", "127.0.0.1")?,
            port: parse_env_or_default::<u16>("ASSISTANT_PORT", "3001")?,
            base_url: get_env_or_default("ASSISTANT_BASE_URL", "http://localhost:3001"),
            json_logs: get_optional_env("LOG_FORMAT").is_some_and(|v| v == "json"),
            claude: ClaudeConfig::from_env()?,
            purchase_delay: Duration::from_millis(delay_ms),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_rate("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_rate("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a sample rate and check it lies in `0.0..=1.0`.
fn parse_rate(key: &str, default: &str) -> Result<f32, ConfigError> {
    let rate = parse_env_or_default::<f32>(key, default)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        // "ab" has entropy of 1 bit per char (50% a, 50% b)
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_placeholder_key_rejected() {
        let err = validate_secret_strength("sk-ant-your-key-here", "ANTHROPIC_API_KEY").unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(var, _) if var == "ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_low_entropy_key_rejected() {
        assert!(validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaa", "ANTHROPIC_API_KEY").is_err());
    }

    #[test]
    fn test_random_key_accepted() {
        assert!(
            validate_secret_strength("sk-ant-REDACTED", "ANTHROPIC_API_KEY")
                .is_ok()
        );
    }

    #[test]
    fn test_claude_config_debug_redacts_key() {
        let config = ClaudeConfig::new(SecretString::from("sk-ant-REDACTED"));
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("Zq8vR2mK"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_defaults() {
        let config = AssistantConfig::default();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3001");
        assert!(config.claude.is_none());
        assert_eq!(config.purchase_delay, Duration::from_millis(1500));
        assert!(!config.is_secure());
    }

    #[test]
    fn test_parse_env_or_default_reports_bad_value() {
        let err = parse_env_or_default::<u16>("MERCADO_TEST_UNSET_PORT_VAR", "not-a-port").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "MERCADO_TEST_UNSET_PORT_VAR"));
    }
}
