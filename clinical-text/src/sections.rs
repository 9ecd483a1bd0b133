//! Marker-driven segmentation of a note into seven fixed clinical sections.
//!
//! Extraction runs as three passes over one [`SectionSet`], each with its own
//! overwrite policy:
//!
//! 1. marker spans: **never** overwrite (first marker wins);
//! 2. demographics cue: **always** overwrite `demographics` when the cue matches;
//! 3. allergy denial: **always** overwrite `allergies` when present.
//!
//! Offsets are byte offsets into the input; markers are matched
//! case-insensitively on the text itself so spans never drift.

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::{
    Deserialize, Serialize, Serializer,
    ser::SerializeMap,
};

use crate::{descriptors::clean_generic_descriptors, lexicon::Lexicon};

/// Placeholder for a section that was not found.
pub const NOT_AVAILABLE: &str = "Not available";

/// Longest section content kept, in characters, before truncation.
pub const MAX_SECTION_CHARS: usize = 150;

/// Shortest demographics capture that is used as-is.
const MIN_PROFILE_CHARS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Demographics,
    ChiefComplaint,
    MedicalHistory,
    Medications,
    Allergies,
    VitalSigns,
    Observations,
}

impl SectionKey {
    /// All keys in output order.
    pub const ALL: [SectionKey; 7] = [
        SectionKey::Demographics,
        SectionKey::ChiefComplaint,
        SectionKey::MedicalHistory,
        SectionKey::Medications,
        SectionKey::Allergies,
        SectionKey::VitalSigns,
        SectionKey::Observations,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Demographics => "demographics",
            SectionKey::ChiefComplaint => "chief_complaint",
            SectionKey::MedicalHistory => "medical_history",
            SectionKey::Medications => "medications",
            SectionKey::Allergies => "allergies",
            SectionKey::VitalSigns => "vital_signs",
            SectionKey::Observations => "observations",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exactly one value per [`SectionKey`]; unfilled keys read as [`NOT_AVAILABLE`].
///
/// Serializes as an ordered JSON object keyed by section name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionSet {
    values: [Option<String>; 7],
}

impl SectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracted text, or `None` if the key is still at the sentinel.
    pub fn get(&self, key: SectionKey) -> Option<&str> {
        self.values[key.index()].as_deref()
    }

    /// Extracted text or [`NOT_AVAILABLE`].
    pub fn value(&self, key: SectionKey) -> &str {
        self.get(key).unwrap_or(NOT_AVAILABLE)
    }

    /// Unconditional write.
    pub fn set(&mut self, key: SectionKey, value: impl Into<String>) {
        self.values[key.index()] = Some(value.into());
    }

    /// Writes only if the key is still empty. Returns whether it wrote.
    pub fn fill(&mut self, key: SectionKey, value: impl Into<String>) -> bool {
        let slot = &mut self.values[key.index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(value.into());
        true
    }

    /// Number of keys not at the sentinel.
    pub fn found(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionKey, &str)> {
        SectionKey::ALL.into_iter().map(|k| (k, self.value(k)))
    }
}

impl Serialize for SectionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SectionKey::ALL.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

/// One located marker. Produced and consumed inside [`extract_sections`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerHit {
    pub start: usize,
    pub end: usize,
    pub key: SectionKey,
    pub marker: String,
}

/// Every marker occurrence in `text`, sorted by start offset.
///
/// The sort is stable, so hits sharing a start keep table order.
pub fn find_markers(lexicon: &Lexicon, text: &str) -> Vec<MarkerHit> {
    let mut hits: Vec<MarkerHit> = lexicon
        .markers()
        .iter()
        .flat_map(|m| {
            m.regex.find_iter(text).map(move |found| MarkerHit {
                start: found.start(),
                end: found.end(),
                key: m.key,
                marker: found.as_str().to_string(),
            })
        })
        .collect();
    hits.sort_by_key(|h| h.start);
    hits
}

/// Splits `text` into the seven sections.
///
/// Input is expected to be de-identified and abbreviation-expanded.
pub fn extract_sections(lexicon: &Lexicon, text: &str) -> SectionSet {
    let mut sections = SectionSet::new();

    fill_from_markers(&mut sections, &find_markers(lexicon, text), text);

    if let Some(demographics) = demographics_line(text) {
        sections.set(SectionKey::Demographics, demographics);
    }

    if ALLERGY_DENIAL.is_match(text) {
        sections.set(SectionKey::Allergies, "No known allergies");
    }

    tracing::debug!(found = sections.found(), "sections extracted");
    sections
}

fn fill_from_markers(sections: &mut SectionSet, hits: &[MarkerHit], text: &str) {
    for (i, hit) in hits.iter().enumerate() {
        let end = hits.get(i + 1).map_or(text.len(), |next| next.start);
        // Overlapping markers yield an empty span.
        let raw = text.get(hit.end..end.max(hit.end)).unwrap_or_default();
        let content = truncate_at_space(trim_section(raw), MAX_SECTION_CHARS);

        if content.chars().count() > 2 && content != NOT_AVAILABLE {
            sections.fill(hit.key, content);
        }
    }
}

fn trim_section(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || ":;,.-".contains(c))
}

fn truncate_at_space(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        return content.to_string();
    }
    let head: String = content.chars().take(max_chars).collect();
    match head.rfind(' ') {
        Some(cut) if cut > 0 => format!("{}...", &head[..cut]),
        _ => format!("{head}..."),
    }
}

static PROFILE_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\[PATIENT\]|\bpt\b|\bpatient\b)\s*(?:profile)?\s*:?\s*([^.]+)")
        .expect("profile cue regex")
});

static AGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:year|yo|y\.o\.)").expect("age regex"));

static AGE_DESCRIPTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\w+\s+)?\d+\s*(?:year|yo)").expect("descriptor regex"));

static ALLERGY_DENIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)no\s+(?:known\s+)?allergies|nkda").expect("allergy regex")
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("ws regex"));

/// `"<profile> - Gender: <gender>"` from the first patient-profile cue.
///
/// A capture shorter than five characters after descriptor cleanup falls back
/// to the first age expression and the words around it.
fn demographics_line(text: &str) -> Option<String> {
    let capture = PROFILE_CUE.captures(text)?.get(1)?.as_str();
    let profile = clean_generic_descriptors(capture);
    let profile = WHITESPACE.replace_all(&profile, " ").trim().to_string();

    if profile.chars().count() >= MIN_PROFILE_CHARS {
        return Some(format!("{profile} - Gender: {}", infer_gender(&profile)));
    }

    let age = AGE.find(text)?;
    let context = age_window(text, age.start(), age.end());
    let descriptor = AGE_DESCRIPTOR.find(text)?;
    Some(format!(
        "{} - Gender: {}",
        descriptor.as_str(),
        infer_gender(&context)
    ))
}

/// 20 characters before an age match through 50 characters after it.
fn age_window(text: &str, start: usize, end: usize) -> String {
    let before: Vec<char> = text[..start].chars().collect();
    let lead: String = before[before.len().saturating_sub(20)..].iter().collect();
    let trail: String = text[end..].chars().take(50).collect();
    format!("{lead}{}{trail}", &text[start..end])
}

/// Female cues are checked first: "female" contains "male".
fn infer_gender(context: &str) -> &'static str {
    let lower = context.to_lowercase();
    if lower.contains("female") || lower.contains("woman") {
        "female"
    } else if lower.contains("male") || lower.contains("man") {
        "male"
    } else {
        "Not mentioned"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex() -> Lexicon {
        Lexicon::standard().unwrap()
    }

    #[test]
    fn markers_do_not_leak_into_each_other() {
        let sections = extract_sections(&lex(), "CC: chest pain. PMH: none.");
        assert_eq!(sections.value(SectionKey::ChiefComplaint), "chest pain");
        assert_eq!(sections.value(SectionKey::MedicalHistory), "none");
        assert_eq!(sections.found(), 2);
        assert_eq!(sections.value(SectionKey::Medications), NOT_AVAILABLE);
    }

    #[test]
    fn first_marker_wins() {
        let sections = extract_sections(
            &lex(),
            "chief complaint: cough. presenting complaint: wheeze.",
        );
        assert_eq!(sections.value(SectionKey::ChiefComplaint), "cough");
    }

    #[test]
    fn short_content_is_ignored() {
        let sections = extract_sections(&lex(), "Meds: no. Medications: metformin daily");
        assert_eq!(
            sections.value(SectionKey::Medications),
            "metformin daily"
        );
    }

    #[test]
    fn markers_need_word_boundaries() {
        let hits = find_markers(&lex(), "accept the specimen");
        assert!(hits.is_empty(), "{hits:?}");
    }

    #[test]
    fn hits_are_sorted_by_position() {
        let hits = find_markers(&lex(), "Vitals: ok. Allergies: none. HPI: cough");
        let keys: Vec<_> = hits.iter().map(|h| h.key).collect();
        assert_eq!(
            keys,
            [
                SectionKey::VitalSigns,
                SectionKey::Allergies,
                SectionKey::ChiefComplaint
            ]
        );
        assert_eq!(hits[0].marker, "Vitals");
    }

    #[test]
    fn long_content_is_cut_at_a_space() {
        let body = "word ".repeat(60);
        let sections = extract_sections(&lex(), &format!("Findings: {body}"));
        let value = sections.value(SectionKey::Observations);
        assert!(value.ends_with("..."));
        assert!(value.chars().count() <= MAX_SECTION_CHARS + 3);
        assert!(!value.contains("wor..."));
    }

    #[test]
    fn demographics_from_profile_cue() {
        let sections = extract_sections(&lex(), "[PATIENT]: 45 year old woman. CC: cough");
        assert_eq!(
            sections.value(SectionKey::Demographics),
            "45 year old woman - Gender: female"
        );
    }

    #[test]
    fn demographics_fall_back_to_age_window() {
        // "young adult" is stripped, leaving only "32yo".
        let sections = extract_sections(&lex(), "Patient: 32yo young adult. Male, no distress");
        assert_eq!(
            sections.value(SectionKey::Demographics),
            "32yo - Gender: male"
        );
    }

    #[test]
    fn demographics_without_gender() {
        let sections = extract_sections(&lex(), "patient profile: retired teacher. CC: fatigue");
        assert_eq!(
            sections.value(SectionKey::Demographics),
            "retired teacher - Gender: Not mentioned"
        );
    }

    #[test]
    fn allergy_denial_overrides_marker_content() {
        let sections = extract_sections(&lex(), "Allergies: none reported, NKDA");
        assert_eq!(sections.value(SectionKey::Allergies), "No known allergies");
    }

    #[test]
    fn serializes_every_key_in_order() {
        let mut sections = SectionSet::new();
        sections.set(SectionKey::Medications, "aspirin");
        let json = serde_json::to_string(&sections).unwrap();
        assert_eq!(
            json,
            r#"{"demographics":"Not available","chief_complaint":"Not available","medical_history":"Not available","medications":"aspirin","allergies":"Not available","vital_signs":"Not available","observations":"Not available"}"#
        );
    }

    #[test]
    fn fill_never_overwrites() {
        let mut sections = SectionSet::new();
        assert!(sections.fill(SectionKey::Allergies, "penicillin"));
        assert!(!sections.fill(SectionKey::Allergies, "latex"));
        assert_eq!(sections.value(SectionKey::Allergies), "penicillin");
    }
}
