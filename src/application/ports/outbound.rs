//! Outbound ports — the upstream text-generation provider
//!
//! [`CompletionProvider`] decouples the generation service from the
//! transport. The production implementation is
//! [`HttpCompletionProvider`](crate::infrastructure::upstream::HttpCompletionProvider).

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Body forwarded to the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("provider responded with status {status}: {body}")]
    Status { status: u16, body: String },
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send one completion request and return the provider's response body
    /// untouched (parsed as JSON when possible, otherwise as a string).
    async fn complete(&self, request: &CompletionRequest)
        -> Result<serde_json::Value, ProviderError>;
}
