//! Public API types re-used by the pipeline.

use rag_base::{Citation, DEFAULT_TOP_K};

/// Knobs for one summary request.
///
/// `None` for `max_tokens` or `temperature` defers to the completion client's
/// configured values (500 tokens, 0.3 by default).
///
/// # Example
/// ```
/// use summarizer::SummaryOptions;
/// let opts = SummaryOptions::default();
/// assert_eq!(opts.top_k, 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryOptions {
    /// Number of policies embedded in the prompt.
    pub top_k: usize,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            max_tokens: None,
            temperature: None,
        }
    }
}

/// Generated (or degraded) summary text with the policies that grounded it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SummaryOutcome {
    /// Model output, or an inline error string when `degraded`.
    pub summary: String,
    pub citations: Vec<Citation>,
    /// The completion service failed and `summary` holds the error text.
    pub degraded: bool,
}

impl SummaryOutcome {
    /// Mean citation relevance; `0.0` without citations.
    pub fn grounding_score(&self) -> f64 {
        if self.citations.is_empty() {
            return 0.0;
        }
        let total: f64 = self.citations.iter().map(|c| c.relevance_score).sum();
        total / self.citations.len() as f64
    }
}
