use clinical_text::Lexicon;
use rag_base::PolicyCorpus;

use crate::error::PipelineError;

/// Immutable tables shared by every request.
///
/// Built once at startup and handed out behind an `Arc`; per-request state
/// lives in [`crate::NotePipeline`].
#[derive(Debug, Clone)]
pub struct ClinicalResources {
    pub lexicon: Lexicon,
    pub corpus: PolicyCorpus,
}

impl ClinicalResources {
    pub fn new(lexicon: Lexicon, corpus: PolicyCorpus) -> Self {
        Self { lexicon, corpus }
    }

    /// Built-in lexicon and policy corpus.
    ///
    /// # Errors
    /// [`PipelineError::Lexicon`] if a built-in table fails to compile.
    pub fn standard() -> Result<Self, PipelineError> {
        Ok(Self::new(Lexicon::standard()?, PolicyCorpus::standard()))
    }
}
