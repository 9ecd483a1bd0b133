//! Stateless safety classifiers.
//!
//! - [`is_diagnostic_question`]: input gate, run on the raw note before anything else.
//! - [`detect_red_flags`]: escalation phrases in the original note.
//! - [`has_hallucinations`]: diagnostic language in a generated summary.
//!
//! All matching is case-insensitive.

use crate::lexicon::Lexicon;

/// Whether the input asks for a diagnosis or advice instead of being a note.
pub fn is_diagnostic_question(lexicon: &Lexicon, text: &str) -> bool {
    lexicon.diagnostic.is_match(text)
}

/// Red-flag phrases present in `note`, in table order (not text order).
pub fn detect_red_flags<'a>(lexicon: &'a Lexicon, note: &str) -> Vec<&'a str> {
    let lower = note.to_lowercase();
    lexicon
        .red_flags
        .iter()
        .filter(|flag| lower.contains(flag.as_str()))
        .map(String::as_str)
        .collect()
}

/// Forbidden diagnostic/prescriptive phrases present in `summary`.
pub fn hallucination_phrases<'a>(lexicon: &'a Lexicon, summary: &str) -> Vec<&'a str> {
    let lower = summary.to_lowercase();
    lexicon
        .forbidden_phrases
        .iter()
        .filter(|phrase| lower.contains(phrase.as_str()))
        .map(String::as_str)
        .collect()
}

/// Whether `summary` contains any forbidden phrase.
pub fn has_hallucinations(lexicon: &Lexicon, summary: &str) -> bool {
    let lower = summary.to_lowercase();
    lexicon
        .forbidden_phrases
        .iter()
        .any(|phrase| lower.contains(phrase.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex() -> Lexicon {
        Lexicon::standard().unwrap()
    }

    #[test]
    fn gate_catches_advice_seeking() {
        let lex = lex();
        for question in [
            "What is my diagnosis?",
            "what disease do I have",
            "Should I take ibuprofen for this",
            "DIAGNOSE ME please",
            "is it cancer",
        ] {
            assert!(is_diagnostic_question(&lex, question), "{question}");
        }
    }

    #[test]
    fn gate_lets_notes_through() {
        let lex = lex();
        for note in [
            "Pt Profile: 32yo male. HPI: progressive SOB for two days. PMH: DM.",
            "CC: chest pain. PMH: none.",
            "Vitals stable, afebrile. Plan: follow up in 2 weeks.",
        ] {
            assert!(!is_diagnostic_question(&lex, note), "{note}");
        }
    }

    #[test]
    fn red_flags_follow_table_order() {
        let lex = lex();
        let flags = detect_red_flags(
            &lex,
            "patient reports severe chest pain and difficulty breathing",
        );
        assert_eq!(flags, ["chest pain", "difficulty breathing"]);

        let flags = detect_red_flags(&lex, "Difficulty Breathing after a STROKE");
        assert_eq!(flags, ["stroke", "difficulty breathing"]);
    }

    #[test]
    fn abbreviations_are_not_red_flags() {
        assert!(detect_red_flags(&lex(), "progressive SOB for two days").is_empty());
    }

    #[test]
    fn hallucination_screen() {
        let lex = lex();
        assert!(!has_hallucinations(&lex, "Patient reports cough for three days."));
        assert!(has_hallucinations(&lex, "We Recommend rest."));
        assert_eq!(
            hallucination_phrases(&lex, "Patient has pneumonia; prescribe antibiotics."),
            ["patient has", "prescribe"]
        );
        assert!(!has_hallucinations(&lex, ""));
    }
}
