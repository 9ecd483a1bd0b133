//! The result envelope returned for every note.

use chrono::{SecondsFormat, Utc};
use clinical_text::{Icd10Code, SectionSet};
use rag_base::Citation;
use serde::Serialize;

use crate::{
    audit::{AuditEvent, AuditSummary},
    confidence::ConfidenceFactor,
    metrics::MetricsReport,
};

pub const REFUSAL_ERROR: &str = "This tool is for SUMMARIZING existing clinical notes only, not for providing medical diagnosis or treatment advice.";
pub const REFUSAL_MESSAGE: &str =
    "Please consult a qualified healthcare professional for medical advice.";
pub const REFUSAL_SUGGESTION: &str = "This summarizer is designed to help organize and document clinical notes that have already been written. It cannot provide medical diagnosis or treatment recommendations.";

/// Appended to every non-empty summary.
pub const DISCLAIMER: &str = "This output is for informational purposes only. Not for diagnosis or treatment advice. Always consult with qualified healthcare professionals.";

/// Outcome of one pipeline run. Serializes as the bare envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum NoteResult {
    Success(Box<SummaryEnvelope>),
    /// Diagnostic question detected; the note was never processed.
    Refused(RefusalEnvelope),
    /// Validation or processing failure.
    Failed(FailureEnvelope),
}

impl NoteResult {
    pub fn is_success(&self) -> bool {
        matches!(self, NoteResult::Success(_))
    }

    /// Audit events captured before the result was produced.
    pub fn audit_trail(&self) -> &[AuditEvent] {
        match self {
            NoteResult::Success(s) => &s.audit_trail,
            NoteResult::Failed(f) => &f.audit_trail,
            NoteResult::Refused(_) => &[],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryEnvelope {
    pub success: bool,
    pub deidentified_note: String,
    pub expanded_note: String,
    pub sections: SectionSet,
    pub sections_found: usize,
    pub ai_summary: String,
    /// `ai_summary` plus the disclaimer, or empty.
    pub final_summary: String,
    pub is_safe: bool,
    pub has_red_flags: bool,
    pub red_flags: Vec<String>,
    pub icd10_codes: Vec<Icd10Code>,
    pub rag_citations: Vec<Citation>,
    pub confidence: f64,
    pub confidence_unclamped: f64,
    pub confidence_explanation: String,
    pub confidence_factors: Vec<ConfidenceFactor>,
    pub metrics: MetricsReport,
    pub audit_trail: Vec<AuditEvent>,
    pub audit_summary: AuditSummary,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefusalEnvelope {
    pub success: bool,
    pub is_diagnostic_question: bool,
    pub error: &'static str,
    pub message: &'static str,
    pub suggestion: &'static str,
    pub timestamp: String,
}

impl RefusalEnvelope {
    pub fn new() -> Self {
        Self {
            success: false,
            is_diagnostic_question: true,
            error: REFUSAL_ERROR,
            message: REFUSAL_MESSAGE,
            suggestion: REFUSAL_SUGGESTION,
            timestamp: now_rfc3339(),
        }
    }
}

impl Default for RefusalEnvelope {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureEnvelope {
    pub success: bool,
    pub error: String,
    pub audit_trail: Vec<AuditEvent>,
    pub timestamp: String,
}

impl FailureEnvelope {
    pub fn new(error: impl Into<String>, audit_trail: Vec<AuditEvent>) -> Self {
        Self {
            success: false,
            error: error.into(),
            audit_trail,
            timestamp: now_rfc3339(),
        }
    }
}

/// `summary` followed by the disclaimer block; empty stays empty.
pub fn with_disclaimer(summary: &str) -> String {
    if summary.is_empty() {
        String::new()
    } else {
        format!("{summary}\n\n**DISCLAIMER:** {DISCLAIMER}")
    }
}

pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refusal_shape() {
        let v = serde_json::to_value(NoteResult::Refused(RefusalEnvelope::new())).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["is_diagnostic_question"], true);
        assert_eq!(v["error"], REFUSAL_ERROR);
        assert_eq!(v["message"], REFUSAL_MESSAGE);
        assert_eq!(v["suggestion"], REFUSAL_SUGGESTION);
    }

    #[test]
    fn disclaimer_only_on_content() {
        assert_eq!(with_disclaimer(""), "");
        let s = with_disclaimer("Summary");
        assert!(s.starts_with("Summary\n\n**DISCLAIMER:** This output"));
    }

    #[test]
    fn failure_carries_trail() {
        let result = NoteResult::Failed(FailureEnvelope::new("boom", Vec::new()));
        assert!(!result.is_success());
        let v = serde_json::to_value(&result).unwrap();
        assert_eq!(v["error"], "boom");
        assert!(v["audit_trail"].as_array().unwrap().is_empty());
    }
}
