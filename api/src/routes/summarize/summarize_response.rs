use clinical_text::{Icd10Code, SectionSet};
use note_pipeline::{
    AuditSummary, ConfidenceFactor, MetricsReport, NoteResult, RefusalEnvelope,
};
use rag_base::Citation;
use serde::Serialize;

/// Response payload for POST /api/summarize.
///
/// The success body omits the intermediate notes and the full audit trail;
/// failures carry only `success` and `error`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SummarizeResponse {
    Summary(Box<SummaryBody>),
    Refusal(RefusalEnvelope),
    Failure(FailureBody),
}

#[derive(Debug, Serialize)]
pub struct SummaryBody {
    pub success: bool,
    pub sections: SectionSet,
    pub ai_summary: String,
    pub final_summary: String,
    pub is_safe: bool,
    pub has_red_flags: bool,
    pub red_flags: Vec<String>,
    pub confidence: f64,
    pub sections_found: usize,
    pub icd10_codes: Vec<Icd10Code>,
    pub rag_citations: Vec<Citation>,
    pub confidence_explanation: String,
    pub confidence_factors: Vec<ConfidenceFactor>,
    pub metrics: MetricsReport,
    pub audit_summary: AuditSummary,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct FailureBody {
    pub success: bool,
    pub error: String,
}

impl From<NoteResult> for SummarizeResponse {
    fn from(result: NoteResult) -> Self {
        match result {
            NoteResult::Success(env) => {
                let env = *env;
                SummarizeResponse::Summary(Box::new(SummaryBody {
                    success: true,
                    sections: env.sections,
                    ai_summary: env.ai_summary,
                    final_summary: env.final_summary,
                    is_safe: env.is_safe,
                    has_red_flags: env.has_red_flags,
                    red_flags: env.red_flags,
                    confidence: env.confidence,
                    sections_found: env.sections_found,
                    icd10_codes: env.icd10_codes,
                    rag_citations: env.rag_citations,
                    confidence_explanation: env.confidence_explanation,
                    confidence_factors: env.confidence_factors,
                    metrics: env.metrics,
                    audit_summary: env.audit_summary,
                    timestamp: env.timestamp,
                }))
            }
            NoteResult::Refused(refusal) => SummarizeResponse::Refusal(refusal),
            NoteResult::Failed(failure) => SummarizeResponse::Failure(FailureBody {
                success: false,
                error: failure.error,
            }),
        }
    }
}
