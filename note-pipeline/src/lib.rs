//! Note-processing pipeline for the clinical documentation assistant.
//!
//! - [`NotePipeline`]: the single entry point, built fresh per note.
//! - [`ClinicalResources`]: immutable tables shared across requests.
//! - [`metrics`], [`confidence`]: overlap scores and the explainable confidence model.
//! - [`audit`], [`result`]: per-call audit trail and the result envelope.

pub mod audit;
pub mod confidence;
mod error;
pub mod metrics;
pub mod pipeline;
mod resources;
pub mod result;

pub use audit::{AuditEvent, AuditStatus, AuditSummary, AuditTrail};
pub use confidence::{ConfidenceFactor, ConfidenceReport, confidence};
pub use error::PipelineError;
pub use metrics::{MetricsReport, bleu_score, rouge_score};
pub use pipeline::{LengthViolation, MAX_NOTE_CHARS, MIN_NOTE_CHARS, NotePipeline};
pub use resources::ClinicalResources;
pub use result::{DISCLAIMER, FailureEnvelope, NoteResult, RefusalEnvelope, SummaryEnvelope};
