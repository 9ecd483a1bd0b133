//! Text-level building blocks of the note pipeline.
//!
//! - [`lexicon`]: static tables and their compiled, injectable form ([`Lexicon`]).
//! - [`deidentify`], [`abbreviations`], [`descriptors`]: pure string transforms.
//! - [`sections`]: marker-driven segmentation into a fixed [`SectionSet`].
//! - [`safety`]: diagnostic-question gate, red flags, hallucination screen.
//! - [`icd10`]: condition → ICD-10 code lookup.

pub mod abbreviations;
pub mod deidentify;
pub mod descriptors;
pub mod error;
pub mod icd10;
pub mod lexicon;
pub mod safety;
pub mod sections;

pub use abbreviations::{count_abbreviations, expand_abbreviations};
pub use deidentify::deidentify;
pub use descriptors::clean_generic_descriptors;
pub use error::LexiconError;
pub use icd10::{Icd10Code, extract_icd10_codes};
pub use lexicon::{Lexicon, LexiconTables};
pub use safety::{detect_red_flags, hallucination_phrases, has_hallucinations, is_diagnostic_question};
pub use sections::{NOT_AVAILABLE, SectionKey, SectionSet, extract_sections};
