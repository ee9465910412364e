//! Claude API integration.
//!
//! A minimal, non-streaming client for the Anthropic Messages API. Each
//! rewrite is a single request: a system instruction plus one user message.

mod client;
mod error;
mod types;

pub use client::ClaudeClient;
pub use error::ClaudeError;
pub use types::{ChatRequest, ChatResponse, ContentBlock, Message, StopReason, Usage};
