//! Lexical overlap metrics between a note and its summary.
//!
//! Both scores tokenize on whitespace after lowercasing; punctuation stays
//! attached to words.

use std::collections::HashSet;

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricsReport {
    pub rouge_score: f64,
    pub bleu_score: f64,
    pub rag_grounding_score: f64,
}

impl MetricsReport {
    /// Scores `summary` against `note`. An empty summary scores zero.
    pub fn compute(note: &str, summary: &str, rag_grounding: f64) -> Self {
        let (rouge_score, bleu_score) = if summary.is_empty() {
            (0.0, 0.0)
        } else {
            (rouge_score(note, summary), bleu_score(note, summary))
        };
        Self {
            rouge_score,
            bleu_score,
            rag_grounding_score: round_to(rag_grounding, 3),
        }
    }
}

/// Word-set F1 between `reference` and `candidate`, rounded to 3 decimals.
pub fn rouge_score(reference: &str, candidate: &str) -> f64 {
    let reference = reference.to_lowercase();
    let candidate = candidate.to_lowercase();
    let ref_words: HashSet<&str> = reference.split_whitespace().collect();
    let cand_words: HashSet<&str> = candidate.split_whitespace().collect();
    if ref_words.is_empty() || cand_words.is_empty() {
        return 0.0;
    }

    let overlap = ref_words.intersection(&cand_words).count() as f64;
    let precision = overlap / cand_words.len() as f64;
    let recall = overlap / ref_words.len() as f64;
    if precision + recall == 0.0 {
        return 0.0;
    }
    round_to(2.0 * precision * recall / (precision + recall), 3)
}

/// Share of candidate words (with repeats) found in the reference, rounded to 3 decimals.
pub fn bleu_score(reference: &str, candidate: &str) -> f64 {
    let reference = reference.to_lowercase();
    let candidate = candidate.to_lowercase();
    let ref_words: HashSet<&str> = reference.split_whitespace().collect();
    let cand_words: Vec<&str> = candidate.split_whitespace().collect();
    if cand_words.is_empty() {
        return 0.0;
    }

    let matches = cand_words.iter().filter(|w| ref_words.contains(*w)).count() as f64;
    round_to(matches / cand_words.len() as f64, 3)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rouge_is_set_f1() {
        // ref {a,b,c,d}, cand {a,b,x}: p = 2/3, r = 2/4, f1 = 4/7
        assert_eq!(rouge_score("a b c d", "A b x b"), 0.571);
        assert_eq!(rouge_score("a b", "a b"), 1.0);
        assert_eq!(rouge_score("a b", "c d"), 0.0);
        assert_eq!(rouge_score("", "a"), 0.0);
        assert_eq!(rouge_score("a", "   "), 0.0);
    }

    #[test]
    fn bleu_counts_repeated_candidate_words() {
        assert_eq!(bleu_score("a b c", "a a z"), 0.667);
        assert_eq!(bleu_score("a b c", ""), 0.0);
        assert_eq!(bleu_score("", "a"), 0.0);
    }

    #[test]
    fn empty_summary_scores_zero() {
        let m = MetricsReport::compute("a long note", "", 0.46666);
        assert_eq!(m.rouge_score, 0.0);
        assert_eq!(m.bleu_score, 0.0);
        assert_eq!(m.rag_grounding_score, 0.467);
    }
}
