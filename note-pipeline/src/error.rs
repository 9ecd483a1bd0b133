//! Typed error for the note-pipeline crate.

use clinical_text::LexiconError;
use summarizer::SummarizerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Lexicon tables failed to compile while building resources.
    #[error("lexicon error: {0}")]
    Lexicon(#[from] LexiconError),

    /// Summarization failed in a way that is not degraded inline.
    #[error("summarization failed: {0}")]
    Summarizer(#[from] SummarizerError),
}
