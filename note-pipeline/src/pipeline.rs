//! The single entry point: one note in, one [`NoteResult`] out.
//!
//! Stages run strictly in sequence:
//!
//! 1. diagnostic-question gate (refusal, before anything else);
//! 2. length validation (10..=5000 characters);
//! 3. de-identification, abbreviation expansion, section extraction;
//! 4. ICD-10 lookup and red flags on the original note;
//! 5. retrieval-augmented summary (skipped without a completion client);
//! 6. hallucination screen, metrics, confidence.
//!
//! Every stage appends to the per-call audit trail.

use ai_llm_service::CompletionClient;
use clinical_text::{
    count_abbreviations, deidentify, detect_red_flags, expand_abbreviations, extract_icd10_codes,
    extract_sections, hallucination_phrases, has_hallucinations, is_diagnostic_question,
};
use serde_json::json;
use summarizer::{SummaryOptions, SummaryOutcome, summarize};
use tracing::{debug, info, warn};

use crate::{
    audit::AuditTrail,
    confidence::confidence,
    error::PipelineError,
    metrics::MetricsReport,
    resources::ClinicalResources,
    result::{
        FailureEnvelope, NoteResult, RefusalEnvelope, SummaryEnvelope, now_rfc3339,
        with_disclaimer,
    },
};

pub const MIN_NOTE_CHARS: usize = 10;
pub const MAX_NOTE_CHARS: usize = 5000;

/// Characters of a refused input kept in the audit trail.
const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthViolation {
    TooShort,
    TooLong,
}

impl LengthViolation {
    pub fn check(chars: usize) -> Result<(), Self> {
        if chars < MIN_NOTE_CHARS {
            Err(Self::TooShort)
        } else if chars > MAX_NOTE_CHARS {
            Err(Self::TooLong)
        } else {
            Ok(())
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::TooShort => "note_too_short",
            Self::TooLong => "note_too_long",
        }
    }

    pub fn message(self) -> String {
        match self {
            Self::TooShort => format!("Note too short (minimum {MIN_NOTE_CHARS} characters)"),
            Self::TooLong => format!("Note too long (maximum {MAX_NOTE_CHARS} characters)"),
        }
    }
}

/// One-shot pipeline for a single note.
///
/// Borrows the shared [`ClinicalResources`] and owns its audit trail; build a
/// new one per request.
pub struct NotePipeline<'a, C> {
    resources: &'a ClinicalResources,
    client: Option<&'a C>,
    options: SummaryOptions,
    trail: AuditTrail,
}

/// Everything computed before the completion event is logged.
struct Analysis {
    deidentified: String,
    expanded: String,
    sections: clinical_text::SectionSet,
    red_flags: Vec<String>,
    icd10_codes: Vec<clinical_text::Icd10Code>,
    outcome: SummaryOutcome,
    has_hallucinations: bool,
    metrics: MetricsReport,
}

impl<'a, C: CompletionClient> NotePipeline<'a, C> {
    /// `client = None` disables AI summarization.
    pub fn new(resources: &'a ClinicalResources, client: Option<&'a C>) -> Self {
        Self {
            resources,
            client,
            options: SummaryOptions::default(),
            trail: AuditTrail::new(),
        }
    }

    pub fn with_options(mut self, options: SummaryOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs the whole pipeline. Never fails: errors become envelopes.
    pub async fn process(mut self, note: &str) -> NoteResult {
        let chars = note.chars().count();
        self.trail
            .record("summarization_started", json!({ "note_length": chars }));

        if is_diagnostic_question(&self.resources.lexicon, note) {
            let preview: String = note.chars().take(PREVIEW_CHARS).collect();
            self.trail
                .record("diagnostic_question_detected", json!({ "note_preview": preview }));
            info!(note_chars = chars, "diagnostic question refused");
            return NoteResult::Refused(RefusalEnvelope::new());
        }

        if let Err(violation) = LengthViolation::check(chars) {
            self.trail
                .record_error("validation_failed", json!({ "reason": violation.code() }));
            info!(note_chars = chars, reason = violation.code(), "note rejected");
            return NoteResult::Failed(FailureEnvelope::new(
                violation.message(),
                self.trail.into_events(),
            ));
        }

        match self.analyze(note).await {
            Ok(analysis) => self.finish(analysis),
            Err(e) => {
                warn!(error = %e, "note processing failed");
                self.trail
                    .record_error("error", json!({ "error": e.to_string() }));
                NoteResult::Failed(FailureEnvelope::new(
                    format!("Error processing note: {e}"),
                    self.trail.into_events(),
                ))
            }
        }
    }

    async fn analyze(&mut self, note: &str) -> Result<Analysis, PipelineError> {
        let lexicon = &self.resources.lexicon;

        let deidentified = deidentify(note);
        self.trail.record(
            "deidentification",
            json!({ "original_length": note.chars().count() }),
        );

        let expanded = expand_abbreviations(lexicon, &deidentified);
        self.trail.record(
            "abbreviation_expansion",
            json!({ "abbreviations_found": count_abbreviations(lexicon, note) }),
        );

        let sections = extract_sections(lexicon, &expanded);
        self.trail
            .record("section_extraction", json!({ "sections_found": sections.found() }));

        let icd10_codes = extract_icd10_codes(lexicon, note);
        self.trail
            .record("icd10_extraction", json!({ "codes_found": icd10_codes.len() }));

        let red_flags: Vec<String> = detect_red_flags(lexicon, note)
            .into_iter()
            .map(str::to_string)
            .collect();
        self.trail
            .record("red_flag_detection", json!({ "red_flags_found": red_flags.len() }));

        let outcome = match self.client {
            Some(client) => {
                summarize(
                    client,
                    &self.resources.corpus,
                    &expanded,
                    &sections,
                    &self.options,
                )
                .await?
            }
            None => SummaryOutcome::default(),
        };
        let details = json!({
            "rag_enabled": true,
            "ai_enabled": self.client.is_some(),
            "citations": outcome.citations.len(),
            "degraded": outcome.degraded,
        });
        if outcome.degraded {
            self.trail.record_error("ai_summarization", details);
        } else {
            self.trail.record("ai_summarization", details);
        }

        let has_hallucinations =
            !outcome.summary.is_empty() && has_hallucinations(lexicon, &outcome.summary);
        // Only lexicon phrases are recorded, never summary text.
        let phrases = if has_hallucinations {
            hallucination_phrases(lexicon, &outcome.summary)
        } else {
            Vec::new()
        };
        self.trail.record(
            "hallucination_check",
            json!({ "hallucinations_detected": has_hallucinations, "phrases": phrases }),
        );

        let metrics = MetricsReport::compute(note, &outcome.summary, outcome.grounding_score());
        self.trail.record("metrics_calculation", json!({}));

        debug!(
            sections_found = sections.found(),
            red_flags = red_flags.len(),
            codes = icd10_codes.len(),
            "note analyzed"
        );

        Ok(Analysis {
            deidentified,
            expanded,
            sections,
            red_flags,
            icd10_codes,
            outcome,
            has_hallucinations,
            metrics,
        })
    }

    fn finish(mut self, a: Analysis) -> NoteResult {
        let sections_found = a.sections.found();
        let report = confidence(
            sections_found,
            !a.red_flags.is_empty(),
            a.has_hallucinations,
            a.outcome.grounding_score(),
        );
        self.trail.record(
            "confidence_calculation",
            json!({ "confidence": report.overall_confidence }),
        );
        self.trail
            .record("summarization_completed", json!({ "success": true }));

        info!(
            sections_found,
            red_flags = a.red_flags.len(),
            confidence = report.overall_confidence,
            "note summarized"
        );

        let audit_summary = self.trail.summary();
        let final_summary = with_disclaimer(&a.outcome.summary);

        NoteResult::Success(Box::new(SummaryEnvelope {
            success: true,
            deidentified_note: a.deidentified,
            expanded_note: a.expanded,
            sections: a.sections,
            sections_found,
            ai_summary: a.outcome.summary,
            final_summary,
            is_safe: !a.has_hallucinations,
            has_red_flags: !a.red_flags.is_empty(),
            red_flags: a.red_flags,
            icd10_codes: a.icd10_codes,
            rag_citations: a.outcome.citations,
            confidence: report.overall_confidence,
            confidence_unclamped: report.unclamped,
            confidence_explanation: report.explanation,
            confidence_factors: report.factors,
            metrics: a.metrics,
            audit_trail: self.trail.into_events(),
            audit_summary,
            timestamp: now_rfc3339(),
        }))
    }
}
