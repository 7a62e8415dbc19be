//! Abstraction over the chat-completion service

use super::error::AiError;
use async_trait::async_trait;

/// One chat-completion call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub prompt: String,
    /// JPEG bytes sent alongside the prompt
    pub image_jpeg: Option<Vec<u8>>,
    /// Ask the service for a JSON object instead of free text
    pub json_mode: bool,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens,
            ..Self::default()
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_image(mut self, jpeg: Vec<u8>) -> Self {
        self.image_jpeg = Some(jpeg);
        self
    }

    pub fn json(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

/// A text-generation backend
///
/// Implementations must be cheap to call concurrently; the assistant holds
/// one behind an `Arc` and may call it again on retry.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Return the raw text of the first completion choice
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError>;
}
