use serde::Serialize;

use crate::lexicon::Lexicon;

/// A condition found in a note with its ICD-10 code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icd10Code {
    pub condition: String,
    pub icd10_code: String,
    /// `"<Title Case Condition> - <code>"`.
    pub description: String,
}

/// Table conditions found as substrings of `note`, in table order.
///
/// Runs on the original note so expansions cannot introduce matches.
pub fn extract_icd10_codes(lexicon: &Lexicon, note: &str) -> Vec<Icd10Code> {
    let lower = note.to_lowercase();
    lexicon
        .icd10_codes
        .iter()
        .filter(|(condition, _)| lower.contains(condition.as_str()))
        .map(|(condition, code)| Icd10Code {
            condition: condition.clone(),
            icd10_code: code.clone(),
            description: format!("{} - {code}", title_case(condition)),
        })
        .collect()
}

/// Uppercases the first letter of every alphabetic run.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() && !prev_alpha {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_conditions_in_table_order() {
        let lex = Lexicon::standard().unwrap();
        let codes = extract_icd10_codes(&lex, "Headache and FEVER since Monday, hx of Hypertension");
        let found: Vec<_> = codes.iter().map(|c| c.icd10_code.as_str()).collect();
        assert_eq!(found, ["I10", "R50.9", "R51.9"]);
        assert_eq!(codes[0].description, "Hypertension - I10");
    }

    #[test]
    fn description_is_title_cased() {
        let lex = Lexicon::standard().unwrap();
        let codes = extract_icd10_codes(&lex, "recurrent urinary tract infection");
        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].description, "Urinary Tract Infection - N39.0");
    }

    #[test]
    fn title_case_matches_word_starts() {
        assert_eq!(title_case("gastroesophageal reflux"), "Gastroesophageal Reflux");
        assert_eq!(title_case("x-ray"), "X-Ray");
    }
}
