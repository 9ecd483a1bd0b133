//! Keyword-overlap retrieval over a [`PolicyCorpus`].
//!
//! Score per document:
//! - `+2` for every distinct query word found anywhere in the content (substring match);
//! - `+3` for every document keyword found anywhere in the query.
//!
//! Documents scoring zero are dropped; the rest are ranked by score, ties
//! keeping corpus order. Fully deterministic.

use std::collections::BTreeSet;

use tracing::debug;

use crate::corpus::PolicyCorpus;
use crate::structs::{citation::RetrievedPolicy, policy_document::PolicyDocument};

/// Default number of policies returned.
pub const DEFAULT_TOP_K: usize = 3;

const QUERY_WORD_WEIGHT: u32 = 2;
const KEYWORD_WEIGHT: u32 = 3;
const RELEVANCE_SCALE: f64 = 10.0;

/// Per-request retriever borrowing the shared corpus.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRetriever<'a> {
    corpus: &'a PolicyCorpus,
}

impl<'a> KeywordRetriever<'a> {
    pub fn new(corpus: &'a PolicyCorpus) -> Self {
        Self { corpus }
    }

    /// Top `top_k` policies for `query`, best first.
    pub fn retrieve(&self, query: &str, top_k: usize) -> Vec<RetrievedPolicy<'a>> {
        let query_lower = query.to_lowercase();
        let words: BTreeSet<&str> = query_lower.split_whitespace().collect();

        let mut scored: Vec<(&'a PolicyDocument, u32)> = self
            .corpus
            .documents()
            .iter()
            .map(|doc| (doc, score_document(doc, &query_lower, &words)))
            .filter(|(_, score)| *score > 0)
            .collect();

        // `sort_by` is stable: equal scores keep corpus order.
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.truncate(top_k);

        debug!(
            target: "rag_base::search",
            query_words = words.len(),
            hits = scored.len(),
            "retrieve: done"
        );

        scored
            .into_iter()
            .map(|(document, score)| RetrievedPolicy {
                document,
                score,
                relevance: (f64::from(score) / RELEVANCE_SCALE).min(1.0),
                citation: format!("[Policy {}]", document.id),
            })
            .collect()
    }
}

fn score_document(doc: &PolicyDocument, query_lower: &str, words: &BTreeSet<&str>) -> u32 {
    let content = doc.content.to_lowercase();
    let word_hits = words.iter().filter(|w| content.contains(**w)).count() as u32;
    let keyword_hits = doc
        .keywords
        .iter()
        .filter(|k| query_lower.contains(k.as_str()))
        .count() as u32;
    QUERY_WORD_WEIGHT * word_hits + KEYWORD_WEIGHT * keyword_hits
}
