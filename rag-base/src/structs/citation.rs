//! Retrieval outputs: ranked hits and the citations derived from them.

use serde::{Deserialize, Serialize};

use super::policy_document::PolicyDocument;

/// A ranked retrieval result borrowing its document from the corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedPolicy<'a> {
    pub document: &'a PolicyDocument,

    /// Raw keyword-overlap score (always > 0).
    pub score: u32,

    /// `min(score / 10, 1)`.
    pub relevance: f64,

    /// `"[Policy <id>]"`.
    pub citation: String,
}

impl RetrievedPolicy<'_> {
    pub fn to_citation(&self) -> Citation {
        Citation {
            source: self.document.id.clone(),
            title: self.document.title.clone(),
            relevance_score: self.relevance,
        }
    }
}

/// Source attribution reported alongside a generated summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub source: String,
    pub title: String,
    pub relevance_score: f64,
}
