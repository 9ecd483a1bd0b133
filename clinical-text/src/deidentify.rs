//! Regex redaction of direct identifiers.
//!
//! Redaction is pattern based and deliberately greedy: any two consecutive
//! capitalized words are treated as a person name. Over-redaction of labels
//! such as "Chief Complaint" is accepted; output tokens are bracketed and do
//! not match any pattern, so the transform is idempotent.

use std::sync::LazyLock;

use regex::Regex;

pub const REDACTED_EMAIL: &str = "[REDACTED_EMAIL]";
pub const REDACTED_PHONE: &str = "[REDACTED_PHONE]";
pub const REDACTED_ID: &str = "[REDACTED_ID]";
pub const PATIENT_PLACEHOLDER: &str = "[PATIENT]";

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[\w.-]+@[\w.-]+\.\w+\b").expect("email regex"));

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\+?\d{1,3}[-.\s]?)?(\(?\d{2,3}\)?[-.\s]?)?\d{3}[-.\s]?\d{4}\b")
        .expect("phone regex")
});

static RECORD_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:MRN|ID|PatientID|PID)[:\s-]*[A-Za-z0-9]+\b").expect("id regex")
});

static FULL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+ [A-Z][a-z]+\b").expect("name regex"));

/// Replaces emails, phone numbers, record IDs and capitalized name pairs.
///
/// Order matters: emails go first so their digits are not read as a phone
/// number, names go last so they cannot split an identifier.
pub fn deidentify(text: &str) -> String {
    let text = EMAIL.replace_all(text, REDACTED_EMAIL);
    let text = PHONE.replace_all(&text, REDACTED_PHONE);
    let text = RECORD_ID.replace_all(&text, REDACTED_ID);
    FULL_NAME
        .replace_all(&text, PATIENT_PLACEHOLDER)
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_each_identifier_kind() {
        let out = deidentify("Seen by John Smith, john.smith@clinic.org, 555-123-4567, MRN: 88231");
        assert!(out.contains(PATIENT_PLACEHOLDER));
        assert!(out.contains(REDACTED_EMAIL));
        assert!(out.contains(REDACTED_PHONE));
        assert!(out.contains(REDACTED_ID));
        assert!(!out.contains("John"));
        assert!(!out.contains("88231"));
        assert!(!out.contains("4567"));
    }

    #[test]
    fn capitalized_labels_are_over_redacted() {
        assert_eq!(deidentify("Pt Profile: 32yo"), "[PATIENT]: 32yo");
    }

    #[test]
    fn leaves_plain_clinical_text_alone() {
        let note = "patient reports cough for 3 days, temp 38.2";
        assert_eq!(deidentify(note), note);
    }

    #[test]
    fn is_idempotent() {
        let notes = [
            "Contact Jane Doe at jane@x.io or (555) 123-4567. ID 7781A.",
            "CC: chest pain. PMH: none.",
            "Mary Ann Lee, PatientID-99, +1 555 222 3333",
            "",
        ];
        for note in notes {
            let once = deidentify(note);
            assert_eq!(deidentify(&once), once, "input: {note}");
        }
    }
}
