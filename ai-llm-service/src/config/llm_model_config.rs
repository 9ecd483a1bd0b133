use crate::config::retry_policy::RetryPolicy;

/// Configuration for a completion-model invocation.
///
/// # Fields
///
/// - `model`: The model identifier (e.g., `"gpt-4o-mini"`).
/// - `endpoint`: Full chat-completions URL of an OpenAI-compatible API.
/// - `api_key`: Bearer token. Absence means the feature is disabled upstream.
/// - `max_tokens`: Maximum number of tokens to generate.
/// - `temperature`: Controls randomness (0.0 = deterministic).
/// - `timeout_secs`: Per-attempt request timeout in seconds.
/// - `retry`: Attempt cap and backoff schedule.
///
/// # Examples
///
/// ```
/// use ai_llm_service::{LlmModelConfig, RetryPolicy};
///
/// let cfg = LlmModelConfig {
///     model: "gpt-4o-mini".to_string(),
///     endpoint: "https://models.inference.ai.azure.com/chat/completions".to_string(),
///     api_key: Some("ghp_...".to_string()),
///     max_tokens: Some(500),
///     temperature: Some(0.3),
///     timeout_secs: Some(30),
///     retry: RetryPolicy::default(),
/// };
/// assert_eq!(cfg.retry.max_attempts, 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// Model identifier string.
    pub model: String,

    /// Chat-completions URL (called as-is, no path is appended).
    pub endpoint: String,

    /// Optional bearer token.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,

    /// Retry schedule for transient failures.
    pub retry: RetryPolicy,
}
