//! Typed error for the summarizer crate.

use ai_llm_service::AiLlmError;
use thiserror::Error;

/// Failures that are not degraded into the summary text.
///
/// Exhausted retries and malformed responses never reach this type; they
/// become inline summary strings. What remains is misconfiguration.
#[derive(Debug, Error)]
pub enum SummarizerError {
    /// The completion client rejected the request outright.
    #[error("completion error: {0}")]
    Completion(#[from] AiLlmError),
}
