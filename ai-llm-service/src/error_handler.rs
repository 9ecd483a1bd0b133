//! Unified error handling for `ai-llm-service`.
//!
//! This module exposes a single top-level error type [`AiLlmError`] for the whole
//! library, and groups domain-specific errors in nested types ([`ConfigError`],
//! [`ProviderError`]). Small helpers for reading/validating environment variables
//! return the unified [`Result<T>`] alias.
//!
//! All messages include the suffix `[AI LLM Service]` to simplify attribution in logs.

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `ai-llm-service` crate.
///
/// Callers that need to degrade gracefully should branch on
/// [`AiLlmError::is_retryable`] and [`AiLlmError::is_malformed_response`]
/// rather than matching on variants directly.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup/readiness).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Provider-level failures: bad status, undecodable payloads, etc.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Underlying HTTP transport error (connect, timeout, body read).
    #[error("[AI LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// Every attempt failed with a retryable error.
    #[error("[AI LLM Service] giving up after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Number of attempts performed.
        attempts: u32,
        /// The error of the final attempt.
        last: Box<AiLlmError>,
    },
}

impl AiLlmError {
    /// Whether another attempt may succeed.
    ///
    /// Transport failures and any non-2xx status are treated alike; rate limits
    /// and server errors are not distinguished.
    pub fn is_retryable(&self) -> bool {
        match self {
            AiLlmError::HttpTransport(_) => true,
            AiLlmError::Provider(p) => matches!(p.kind, ProviderErrorKind::HttpStatus(_)),
            AiLlmError::Config(_) | AiLlmError::RetriesExhausted { .. } => false,
        }
    }

    /// Whether the server answered 2xx with a payload we could not use.
    pub fn is_malformed_response(&self) -> bool {
        match self {
            AiLlmError::Provider(p) => matches!(
                p.kind,
                ProviderErrorKind::Decode(_) | ProviderErrorKind::EmptyChoices
            ),
            _ => false,
        }
    }
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
///
/// Keep this focused: only errors that realistically happen at config
/// load/validation time.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A number failed to parse (like limits, timeouts).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_MAX_TOKENS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `GITHUB_API_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// A numeric field was outside of the allowed range.
    #[error("[AI LLM Service] {field} is out of range: {detail}")]
    OutOfRange {
        /// Field name (e.g., `temperature`).
        field: &'static str,
        /// Description of the expected range.
        detail: &'static str,
    },

    /// Model name was empty.
    #[error("[AI LLM Service] model name must not be empty")]
    EmptyModel,
}

/* ------------------------------------------------------------------------- */
/* Provider errors                                                           */
/* ------------------------------------------------------------------------- */

/// Details of a non-successful HTTP response.
#[derive(Debug)]
pub struct HttpError {
    /// Numeric HTTP status code.
    pub status: StatusCode,
    /// Request URL.
    pub url: String,
    /// Short snippet of the response body (trimmed).
    pub snippet: String,
}

/// What went wrong while talking to the completion provider.
#[non_exhaustive]
#[derive(Debug)]
pub enum ProviderErrorKind {
    /// The endpoint is empty or does not start with http/https.
    InvalidEndpoint(String),
    /// No bearer token was supplied.
    MissingApiKey,
    /// Token could not be encoded as a header value.
    InvalidHeader(String),
    /// Upstream returned a non-successful HTTP status.
    HttpStatus(HttpError),
    /// Response payload could not be decoded as expected.
    Decode(String),
    /// Response decoded but carried no usable choice.
    EmptyChoices,
}

/// Provider error with a short context label (e.g. the model id).
#[derive(Debug, Error)]
#[error("[AI LLM Service] {model}: {}", describe(.kind))]
pub struct ProviderError {
    /// Model identifier the request was made for.
    pub model: String,
    /// Failure kind.
    pub kind: ProviderErrorKind,
}

impl ProviderError {
    pub fn new(model: impl Into<String>, kind: ProviderErrorKind) -> Self {
        Self {
            model: model.into(),
            kind,
        }
    }
}

fn describe(kind: &ProviderErrorKind) -> String {
    match kind {
        ProviderErrorKind::InvalidEndpoint(e) => format!("invalid endpoint: {e}"),
        ProviderErrorKind::MissingApiKey => "missing API token".to_string(),
        ProviderErrorKind::InvalidHeader(e) => format!("invalid authorization header: {e}"),
        ProviderErrorKind::HttpStatus(h) => {
            format!("HTTP {} from {}: {}", h.status, h.url, h.snippet)
        }
        ProviderErrorKind::Decode(e) => format!("decode error: {e}"),
        ProviderErrorKind::EmptyChoices => "response contained no choices".to_string(),
    }
}

/// Trims a response body to a short single-line snippet for logs and errors.
pub fn make_snippet(body: &str) -> String {
    const MAX: usize = 200;
    let flat: String = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX {
        flat
    } else {
        let cut: String = flat.chars().take(MAX).collect();
        format!("{cut}…")
    }
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Reads an optional, non-empty environment variable.
pub fn env_opt(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

/// Parses an optional `u32` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a valid `u32`.
pub fn env_opt_u32(name: &'static str) -> Result<Option<u32>> {
    parse_opt(name, "expected u32")
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a valid `u64`.
pub fn env_opt_u64(name: &'static str) -> Result<Option<u64>> {
    parse_opt(name, "expected u64")
}

/// Parses an optional `f32` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a valid `f32`.
pub fn env_opt_f32(name: &'static str) -> Result<Option<f32>> {
    parse_opt(name, "expected f32")
}

fn parse_opt<T: std::str::FromStr>(name: &'static str, reason: &'static str) -> Result<Option<T>> {
    match env_opt(name) {
        Some(v) => v
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var: name, reason }.into()),
        None => Ok(None),
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers (return unified `Result<T>`)                           */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the string does not start with
/// a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Validates that a floating-point value lies within an inclusive range.
///
/// # Errors
/// Returns [`ConfigError::OutOfRange`] if `value` is outside `[min, max]`.
pub fn validate_range_f32(field: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            detail: "expected value in inclusive range",
        }
        .into())
    }
}
