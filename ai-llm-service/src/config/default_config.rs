//! Default completion config loaded from environment variables.
//!
//! The service talks to an OpenAI-compatible chat endpoint (GitHub Models by
//! default). A missing token is not an error: it means AI summarization is
//! switched off and [`config_github_models`] returns `Ok(None)`.
//!
//! # Environment variables
//!
//! - `GITHUB_MODELS_TOKEN` = bearer token (optional; absent disables the feature)
//! - `MODEL_ID`            = model identifier (default `gpt-4o-mini`)
//! - `GITHUB_API_URL`      = chat-completions URL
//! - `LLM_MAX_TOKENS`      = max output tokens (default 500)
//! - `LLM_TEMPERATURE`     = sampling temperature (default 0.3)
//! - `LLM_TIMEOUT_SECS`    = per-attempt timeout (default 30)
//! - `LLM_MAX_RETRIES`     = total attempts (default 3)
//! - `LLM_BACKOFF_BASE_MS` = first backoff delay (default 1000)

use std::time::Duration;

use crate::{
    config::{llm_model_config::LlmModelConfig, retry_policy::RetryPolicy},
    error_handler::{
        AiLlmError, ConfigError, env_opt, env_opt_f32, env_opt_u32, env_opt_u64,
        validate_http_endpoint, validate_range_f32,
    },
};

pub const DEFAULT_MODEL_ID: &str = "gpt-4o-mini";
pub const DEFAULT_API_URL: &str = "https://models.inference.ai.azure.com/chat/completions";
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 1000;

/// Env var holding the bearer token.
pub const TOKEN_VAR: &str = "GITHUB_MODELS_TOKEN";

/// Builds the completion config from the process environment.
///
/// # Errors
///
/// - [`ConfigError::InvalidNumber`] for unparsable numeric variables
/// - [`ConfigError::InvalidFormat`] if `GITHUB_API_URL` is not http(s)
/// - [`ConfigError::OutOfRange`] if the temperature is outside `0.0..=2.0`
/// - [`ConfigError::EmptyModel`] if `MODEL_ID` is set to whitespace only
pub fn config_github_models() -> Result<Option<LlmModelConfig>, AiLlmError> {
    let Some(token) = env_opt(TOKEN_VAR) else {
        return Ok(None);
    };

    let model = match std::env::var("MODEL_ID") {
        Ok(v) if v.trim().is_empty() => return Err(ConfigError::EmptyModel.into()),
        Ok(v) => v.trim().to_string(),
        Err(_) => DEFAULT_MODEL_ID.to_string(),
    };

    let endpoint = env_opt("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
    validate_http_endpoint("GITHUB_API_URL", &endpoint)?;

    let temperature = env_opt_f32("LLM_TEMPERATURE")?.unwrap_or(DEFAULT_TEMPERATURE);
    validate_range_f32("temperature", temperature, 0.0, 2.0)?;

    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_TOKENS);
    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

    let defaults = RetryPolicy::default();
    let retry = RetryPolicy {
        max_attempts: env_opt_u32("LLM_MAX_RETRIES")?.unwrap_or(defaults.max_attempts),
        base_delay: env_opt_u64("LLM_BACKOFF_BASE_MS")?
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_BACKOFF_BASE_MS)),
    };

    Ok(Some(LlmModelConfig {
        model,
        endpoint,
        api_key: Some(token),
        max_tokens: Some(max_tokens),
        temperature: Some(temperature),
        timeout_secs: Some(timeout_secs),
        retry,
    }))
}
