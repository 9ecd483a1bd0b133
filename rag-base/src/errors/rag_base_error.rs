//! Unified error type for the rag-base crate.

use thiserror::Error;

/// Errors produced while building a policy corpus.
#[derive(Debug, Error)]
pub enum RagBaseError {
    // ── Corpus validation ───────────────────────────────────────────────────
    /// Corpus has no documents.
    #[error("policy corpus is empty")]
    EmptyCorpus,

    /// Two documents share an id.
    #[error("duplicate policy id: {0}")]
    DuplicateId(String),

    /// A document is missing a required field.
    #[error("invalid policy document '{id}': {reason}")]
    InvalidDocument { id: String, reason: &'static str },

    // ── JSON / serialization ────────────────────────────────────────────────
    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
