//! The fixed policy corpus.
//!
//! Built once at startup and shared read-only. Keywords are kept as written and
//! matched against the lowercased query, so mixed-case keywords such as `"SOAP"`
//! never match.

use std::collections::HashSet;

use tracing::info;

use crate::errors::rag_base_error::RagBaseError;
use crate::structs::policy_document::PolicyDocument;

const STANDARD_POLICIES: &[(&str, &str, &str, &[&str])] = &[
    (
        "policy_001",
        "Safety Policy",
        "The AI assistant must NOT provide medical diagnosis or treatment advice. Only document and summarize existing clinical information.",
        &["safety", "diagnosis", "advice", "document", "summarize"],
    ),
    (
        "policy_002",
        "Red Flag Escalation",
        "Red flag symptoms requiring immediate clinician notification: chest pain, shortness of breath, signs of stroke, severe bleeding, loss of consciousness.",
        &["red flag", "chest pain", "shortness of breath", "stroke", "bleeding", "consciousness"],
    ),
    (
        "policy_003",
        "Documentation Standards",
        "All summaries must use neutral, professional language. Include disclaimer that this is for documentation support only.",
        &["documentation", "standards", "professional", "language", "disclaimer"],
    ),
    (
        "policy_004",
        "SOAP Note Format",
        "Standard format: S (Subjective - patient reported), O (Objective - measured data), A (Assessment - clinical findings), P (Plan - next steps).",
        &["SOAP", "subjective", "objective", "assessment", "plan", "format"],
    ),
    (
        "policy_005",
        "PII Protection",
        "Always de-identify patient information: remove names, email addresses, phone numbers, medical record numbers, and social security numbers.",
        &["PII", "de-identify", "privacy", "names", "email", "phone", "SSN"],
    ),
    (
        "policy_006",
        "Abbreviation Standards",
        "Expand all medical abbreviations for clarity: BP (blood pressure), HR (heart rate), DM (diabetes mellitus), HTN (hypertension).",
        &["abbreviation", "expand", "BP", "HR", "DM", "HTN", "clarity"],
    ),
];

/// Ordered, validated set of policy documents.
///
/// Corpus order is the retrieval tie-break.
#[derive(Debug, Clone)]
pub struct PolicyCorpus {
    documents: Vec<PolicyDocument>,
}

impl PolicyCorpus {
    /// The six built-in policies.
    pub fn standard() -> Self {
        let documents = STANDARD_POLICIES
            .iter()
            .map(|(id, title, content, keywords)| PolicyDocument {
                id: id.to_string(),
                title: title.to_string(),
                content: content.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect();
        Self { documents }
    }

    /// Validates a custom corpus.
    ///
    /// # Errors
    /// - [`RagBaseError::EmptyCorpus`] when `documents` is empty
    /// - [`RagBaseError::DuplicateId`] when two documents share an id
    /// - [`RagBaseError::InvalidDocument`] for an empty id or content
    pub fn new(documents: Vec<PolicyDocument>) -> Result<Self, RagBaseError> {
        if documents.is_empty() {
            return Err(RagBaseError::EmptyCorpus);
        }

        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(documents.len());
        for doc in documents {
            if doc.id.trim().is_empty() {
                return Err(RagBaseError::InvalidDocument {
                    id: doc.id,
                    reason: "empty id",
                });
            }
            if doc.content.trim().is_empty() {
                return Err(RagBaseError::InvalidDocument {
                    id: doc.id,
                    reason: "empty content",
                });
            }
            if !seen.insert(doc.id.clone()) {
                return Err(RagBaseError::DuplicateId(doc.id));
            }
            normalized.push(doc);
        }

        info!(
            target: "rag_base::corpus",
            documents = normalized.len(),
            "policy corpus loaded"
        );
        Ok(Self {
            documents: normalized,
        })
    }

    /// Parses a JSON array of [`PolicyDocument`] and validates it.
    ///
    /// # Errors
    /// [`RagBaseError::Json`] on malformed input, otherwise as [`PolicyCorpus::new`].
    pub fn from_json(raw: &str) -> Result<Self, RagBaseError> {
        let documents: Vec<PolicyDocument> = serde_json::from_str(raw)?;
        Self::new(documents)
    }

    pub fn documents(&self) -> &[PolicyDocument] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Default for PolicyCorpus {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_corpus_is_valid() {
        let corpus = PolicyCorpus::standard();
        assert_eq!(corpus.len(), 6);
        let rebuilt = PolicyCorpus::new(corpus.documents().to_vec()).unwrap();
        assert_eq!(rebuilt.documents(), corpus.documents());
    }

    #[test]
    fn keywords_keep_their_case() {
        let corpus = PolicyCorpus::standard();
        let soap = &corpus.documents()[3];
        assert_eq!(soap.keywords[0], "SOAP");

        let custom = PolicyCorpus::from_json(
            r#"[{"id":"x","title":"X","content":"vitals","keywords":["BP","vitals"]}]"#,
        )
        .unwrap();
        assert_eq!(custom.documents()[0].keywords, ["BP", "vitals"]);
    }

    #[test]
    fn rejects_duplicates_and_empty() {
        assert!(matches!(
            PolicyCorpus::new(Vec::new()),
            Err(RagBaseError::EmptyCorpus)
        ));

        let doc = PolicyCorpus::standard().documents()[0].clone();
        assert!(matches!(
            PolicyCorpus::new(vec![doc.clone(), doc]),
            Err(RagBaseError::DuplicateId(id)) if id == "policy_001"
        ));
    }

    #[test]
    fn loads_from_json() {
        let corpus = PolicyCorpus::from_json(
            r#"[{"id":"p1","title":"T","content":"Escalate Sepsis","keywords":["SEPSIS"]}]"#,
        )
        .unwrap();
        assert_eq!(corpus.documents()[0].keywords, ["sepsis"]);

        assert!(matches!(
            PolicyCorpus::from_json("{not json"),
            Err(RagBaseError::Json(_))
        ));
    }
}
