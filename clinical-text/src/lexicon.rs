//! Static clinical tables and their compiled, injectable form.
//!
//! The tables below are the defaults. [`LexiconTables`] is the owned, editable
//! form (tests and alternative deployments can substitute entries), and
//! [`Lexicon`] is the compiled snapshot the pipeline borrows. A `Lexicon` is
//! built once at startup and is read-only afterwards.

use regex::{Regex, RegexSet};

use crate::error::LexiconError;
use crate::sections::SectionKey;

/// Abbreviation → expansion, applied in this order.
///
/// Order is the tie-break for overlapping keys: `w/o` sits before `w/` so that
/// "w/o" expands to "without" instead of "with" + "o".
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("pt", "patient"),
    ("hx", "history"),
    ("dx", "diagnosis"),
    ("tx", "treatment"),
    ("rx", "prescription"),
    ("sx", "symptoms"),
    ("bp", "blood pressure"),
    ("hr", "heart rate"),
    ("rr", "respiratory rate"),
    ("temp", "temperature"),
    ("yo", "year old"),
    ("c/o", "complaining of"),
    ("s/p", "status post"),
    ("w/o", "without"),
    ("w/", "with"),
    ("sob", "shortness of breath"),
    ("cp", "chest pain"),
    ("abd", "abdominal"),
    ("htn", "hypertension"),
    ("dm", "diabetes mellitus"),
    ("cad", "coronary artery disease"),
    ("chf", "congestive heart failure"),
    ("copd", "chronic obstructive pulmonary disease"),
    ("uti", "urinary tract infection"),
    ("bid", "twice daily"),
    ("tid", "three times daily"),
    ("qid", "four times daily"),
    ("prn", "as needed"),
    ("po", "by mouth"),
    ("iv", "intravenous"),
    ("im", "intramuscular"),
    ("npo", "nothing by mouth"),
    ("wbc", "white blood cell"),
    ("rbc", "red blood cell"),
    ("hgb", "hemoglobin"),
    ("plt", "platelets"),
    ("bmp", "basic metabolic panel"),
    ("cbc", "complete blood count"),
    ("ekg", "electrocardiogram"),
    ("cxr", "chest x-ray"),
    ("ct", "computed tomography"),
    ("mri", "magnetic resonance imaging"),
    ("hpi", "history of present illness"),
    ("pmh", "past medical history"),
    ("psh", "past surgical history"),
    ("fhx", "family history"),
    ("pe", "physical examination"),
    ("yoa", "year old adult"),
];

/// Condition (lowercase) → ICD-10 code.
pub const ICD10_CODES: &[(&str, &str)] = &[
    ("diabetes mellitus", "E11.9"),
    ("hypertension", "I10"),
    ("chest pain", "R07.9"),
    ("shortness of breath", "R06.02"),
    ("fever", "R50.9"),
    ("fatigue", "R53.83"),
    ("abdominal pain", "R10.9"),
    ("headache", "R51.9"),
    ("cough", "R05.9"),
    ("nausea", "R11.0"),
    ("vomiting", "R11.10"),
    ("diarrhea", "K59.1"),
    ("constipation", "K59.0"),
    ("back pain", "M54.5"),
    ("joint pain", "M25.5"),
    ("anxiety", "F41.9"),
    ("depression", "F32.9"),
    ("insomnia", "G47.00"),
    ("asthma", "J45.9"),
    ("pneumonia", "J18.9"),
    ("urinary tract infection", "N39.0"),
    ("gastroesophageal reflux", "K21.9"),
    ("migraine", "G43.9"),
    ("allergic rhinitis", "J30.9"),
    ("sinusitis", "J32.9"),
    ("bronchitis", "J20.9"),
    ("pharyngitis", "J02.9"),
];

/// Symptom phrases that require clinician escalation.
pub const RED_FLAGS: &[&str] = &[
    "chest pain",
    "shortness of breath",
    "stroke",
    "severe bleeding",
    "loss of consciousness",
    "difficulty breathing",
];

/// Diagnostic/prescriptive phrases a summary must not contain.
pub const FORBIDDEN_PHRASES: &[&str] = &[
    "diagnosed with",
    "suffering from",
    "patient has",
    "treatment is",
    "recommend",
    "suggests",
    "prescribe",
    "medication should",
];

/// Patterns that identify a request for diagnosis or advice instead of a note.
pub const DIAGNOSTIC_QUESTION_PATTERNS: &[&str] = &[
    // diagnosis
    r"what\s+is\s+(?:the\s+)?diagnos[ie]s?",
    r"what\s+are\s+the\s+diagnos[ie]s?",
    r"what\s+diagnos[ie]s?",
    r"\bdiagnos[ie]s?\b.*\?",
    r"my\s+diagnos[ie]s?",
    r"what\s+is\s+my\s+diagnos[ie]s?",
    // disease
    r"what\s+is\s+(?:the\s+)?disease",
    r"what\s+are\s+(?:the\s+)?diseases",
    r"what\s+diseases?\s+do\s+i\s+have",
    r"my\s+diseases?",
    r"what\s+is\s+my\s+diseases?",
    r"\bdiseases?\b.*\?",
    // condition
    r"what\s+is\s+(?:the\s+)?condition",
    r"what\s+are\s+(?:the\s+)?conditions",
    r"what\s+conditions?\s+do\s+i\s+have",
    r"my\s+conditions?",
    r"what\s+is\s+my\s+conditions?",
    r"\bconditions?\b.*\?",
    // illness
    r"what\s+is\s+(?:the\s+)?illness",
    r"what\s+are\s+(?:the\s+)?illnesses",
    r"what\s+(?:illness|illnesses)\s+do\s+i\s+have",
    r"my\s+(?:illness|illnesses)",
    r"what\s+is\s+my\s+(?:illness|illnesses)",
    r"\b(?:illness|illnesses)\b.*\?",
    // disorder
    r"what\s+is\s+(?:the\s+)?disorder",
    r"what\s+are\s+(?:the\s+)?disorders",
    r"my\s+disorders?",
    r"what\s+is\s+my\s+disorders?",
    r"\bdisorders?\b.*\?",
    // syndrome
    r"what\s+is\s+(?:the\s+)?syndrome",
    r"what\s+are\s+(?:the\s+)?syndromes",
    r"my\s+syndromes?",
    r"what\s+is\s+my\s+syndromes?",
    r"\bsyndromes?\b.*\?",
    // ailment
    r"what\s+is\s+(?:the\s+)?ailment",
    r"what\s+are\s+(?:the\s+)?ailments",
    r"my\s+ailments?",
    r"what\s+is\s+my\s+ailments?",
    r"\bailments?\b.*\?",
    // general advice seeking
    r"what\s+do\s+i\s+have",
    r"diagnose\s+me",
    r"what\s+is\s+wrong\s+with\s+me",
    r"what\s+should\s+i\s+take",
    r"what\s+medication\s+should\s+i\s+take",
    r"should\s+i\s+take",
    r"what\s+treatment\s+do\s+i\s+need",
    r"what\s+should\s+i\s+do",
    r"am\s+i\s+sick",
    r"do\s+i\s+have",
    r"is\s+this\s+serious",
    r"is\s+this\s+dangerous",
    r"will\s+i\s+be\s+okay",
    r"how\s+long\s+will\s+i\s+live",
    r"is\s+it\s+cancer",
    r"is\s+it\s+covid",
    r"should\s+i\s+see",
    r"should\s+i\s+go",
    r"should\s+i\s+visit",
    r"what\s+doctor",
    r"what\s+specialist",
    r"what\s+medicine",
    r"what\s+drug",
    r"what\s+cure",
    r"how\s+to\s+treat",
    r"how\s+to\s+cure",
    r"how\s+to\s+fix",
];

/// Section label pattern → section. Matched case-insensitively on word boundaries.
pub const SECTION_MARKERS: &[(&str, SectionKey)] = &[
    (r"pt\s+profile", SectionKey::Demographics),
    (r"demographics", SectionKey::Demographics),
    (r"hpi", SectionKey::ChiefComplaint),
    (r"history\s+of\s+present\s+illness", SectionKey::ChiefComplaint),
    (r"chief\s+complaint", SectionKey::ChiefComplaint),
    (r"cc", SectionKey::ChiefComplaint),
    (r"presenting\s+complaint", SectionKey::ChiefComplaint),
    (r"pmh", SectionKey::MedicalHistory),
    (r"past\s+medical\s+history", SectionKey::MedicalHistory),
    (r"psh", SectionKey::MedicalHistory),
    (r"past\s+surgical\s+history", SectionKey::MedicalHistory),
    (r"fhx", SectionKey::MedicalHistory),
    (r"family\s+history", SectionKey::MedicalHistory),
    (r"medications", SectionKey::Medications),
    (r"meds", SectionKey::Medications),
    (r"allergies", SectionKey::Allergies),
    (r"allergy", SectionKey::Allergies),
    (r"nkda", SectionKey::Allergies),
    (r"vital\s+signs", SectionKey::VitalSigns),
    (r"vs", SectionKey::VitalSigns),
    (r"vitals", SectionKey::VitalSigns),
    (r"pe", SectionKey::Observations),
    (r"physical\s+exam", SectionKey::Observations),
    (r"physical\s+examination", SectionKey::Observations),
    (r"observations", SectionKey::Observations),
    (r"findings", SectionKey::Observations),
    (r"notes", SectionKey::Observations),
];

/// Owned, editable copy of every table.
#[derive(Debug, Clone)]
pub struct LexiconTables {
    pub abbreviations: Vec<(String, String)>,
    pub icd10_codes: Vec<(String, String)>,
    pub red_flags: Vec<String>,
    pub forbidden_phrases: Vec<String>,
    pub diagnostic_patterns: Vec<String>,
    pub section_markers: Vec<(String, SectionKey)>,
}

impl Default for LexiconTables {
    fn default() -> Self {
        let pairs = |t: &[(&str, &str)]| {
            t.iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect::<Vec<_>>()
        };
        let list = |t: &[&str]| t.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        Self {
            abbreviations: pairs(ABBREVIATIONS),
            icd10_codes: pairs(ICD10_CODES),
            red_flags: list(RED_FLAGS),
            forbidden_phrases: list(FORBIDDEN_PHRASES),
            diagnostic_patterns: list(DIAGNOSTIC_QUESTION_PATTERNS),
            section_markers: SECTION_MARKERS
                .iter()
                .map(|(p, k)| (p.to_string(), *k))
                .collect(),
        }
    }
}

/// A whole-word, case-insensitive abbreviation rule.
#[derive(Debug, Clone)]
pub struct AbbreviationRule {
    pub abbreviation: String,
    pub expansion: String,
    pub(crate) regex: Regex,
}

/// A compiled section marker.
#[derive(Debug, Clone)]
pub struct SectionMarker {
    pub(crate) regex: Regex,
    pub key: SectionKey,
}

/// Compiled, immutable lexicon.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub(crate) abbreviations: Vec<AbbreviationRule>,
    pub(crate) icd10_codes: Vec<(String, String)>,
    pub(crate) red_flags: Vec<String>,
    pub(crate) forbidden_phrases: Vec<String>,
    pub(crate) diagnostic: RegexSet,
    pub(crate) markers: Vec<SectionMarker>,
}

impl Lexicon {
    /// Compiles the default tables.
    ///
    /// # Errors
    /// Only if a default table entry is malformed, which tests rule out.
    pub fn standard() -> Result<Self, LexiconError> {
        Self::new(LexiconTables::default())
    }

    /// Compiles the given tables.
    ///
    /// Phrase tables (red flags, forbidden phrases, ICD-10 conditions) are
    /// lowercased here so lookups can run against lowercased text.
    ///
    /// # Errors
    /// - [`LexiconError::InvalidPattern`] for a regex that does not compile
    /// - [`LexiconError::EmptyTable`] when there are no section markers
    pub fn new(tables: LexiconTables) -> Result<Self, LexiconError> {
        if tables.section_markers.is_empty() {
            return Err(LexiconError::EmptyTable("section marker"));
        }

        let abbreviations = tables
            .abbreviations
            .into_iter()
            .map(|(abbreviation, expansion)| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(&abbreviation));
                let regex = compile("abbreviation", &pattern)?;
                Ok(AbbreviationRule {
                    abbreviation,
                    expansion,
                    regex,
                })
            })
            .collect::<Result<Vec<_>, LexiconError>>()?;

        let diagnostic_patterns: Vec<String> = tables
            .diagnostic_patterns
            .iter()
            .map(|p| format!("(?i){p}"))
            .collect();
        let diagnostic =
            RegexSet::new(&diagnostic_patterns).map_err(|source| LexiconError::InvalidPattern {
                table: "diagnostic question",
                pattern: tables.diagnostic_patterns.join(" | "),
                source,
            })?;

        let markers = tables
            .section_markers
            .into_iter()
            .map(|(pattern, key)| {
                let regex = compile("section marker", &format!(r"(?i)\b(?:{pattern})\b"))?;
                Ok(SectionMarker { regex, key })
            })
            .collect::<Result<Vec<_>, LexiconError>>()?;

        let lower = |v: Vec<String>| v.into_iter().map(|s| s.to_lowercase()).collect::<Vec<_>>();

        Ok(Self {
            abbreviations,
            icd10_codes: tables
                .icd10_codes
                .into_iter()
                .map(|(c, code)| (c.to_lowercase(), code))
                .collect(),
            red_flags: lower(tables.red_flags),
            forbidden_phrases: lower(tables.forbidden_phrases),
            diagnostic,
            markers,
        })
    }

    pub fn abbreviations(&self) -> &[AbbreviationRule] {
        &self.abbreviations
    }

    pub fn red_flags(&self) -> &[String] {
        &self.red_flags
    }

    pub fn markers(&self) -> &[SectionMarker] {
        &self.markers
    }
}

fn compile(table: &'static str, pattern: &str) -> Result<Regex, LexiconError> {
    Regex::new(pattern).map_err(|source| LexiconError::InvalidPattern {
        table,
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_compile() {
        let lex = Lexicon::standard().unwrap();
        assert_eq!(lex.abbreviations().len(), ABBREVIATIONS.len());
        assert_eq!(lex.markers().len(), SECTION_MARKERS.len());
        assert_eq!(lex.diagnostic.len(), DIAGNOSTIC_QUESTION_PATTERNS.len());
    }

    #[test]
    fn broken_marker_is_reported_with_its_table() {
        let mut tables = LexiconTables::default();
        tables
            .section_markers
            .push(("(unclosed".to_string(), SectionKey::Observations));

        let err = Lexicon::new(tables).unwrap_err();
        assert!(matches!(
            err,
            LexiconError::InvalidPattern {
                table: "section marker",
                ..
            }
        ));
    }

    #[test]
    fn markers_are_required() {
        let mut tables = LexiconTables::default();
        tables.section_markers.clear();
        assert!(matches!(
            Lexicon::new(tables),
            Err(LexiconError::EmptyTable(_))
        ));
    }

    #[test]
    fn abbreviations_are_escaped_literals() {
        let mut tables = LexiconTables::default();
        tables.abbreviations = vec![("a.b".into(), "alpha beta".into())];
        let lex = Lexicon::new(tables).unwrap();
        assert!(lex.abbreviations()[0].regex.is_match("see a.b now"));
        assert!(!lex.abbreviations()[0].regex.is_match("see axb now"));
    }
}
