//! The text-completion seam used by the summarizer.
//!
//! Production code uses [`crate::OpenAiService`]; tests plug in scripted
//! clients implementing [`CompletionClient`].

use std::future::Future;

use crate::error_handler::AiLlmError;

/// One completion request: a system role instruction plus a user prompt.
///
/// `max_tokens` and `temperature` override the client's configured values
/// when set.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub prompt: &'a str,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(system: &'a str, prompt: &'a str) -> Self {
        Self {
            system,
            prompt,
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// An opaque text-completion service.
///
/// Implementations own their failure handling contract: retryable failures
/// are retried internally and surface as [`AiLlmError::RetriesExhausted`];
/// malformed responses surface immediately.
pub trait CompletionClient: Send + Sync {
    /// Model identifier, for logs and audit details.
    fn model(&self) -> &str;

    /// Requests a completion and returns the generated text.
    fn complete(
        &self,
        request: CompletionRequest<'_>,
    ) -> impl Future<Output = Result<String, AiLlmError>> + Send;
}
