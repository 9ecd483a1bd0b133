//! Whole-word abbreviation expansion.

use regex::NoExpand;

use crate::lexicon::Lexicon;

/// Expands every known abbreviation, in table order, case-insensitively.
///
/// Only whole words are replaced: "hx" becomes "history" but "pathx" is left
/// alone. Expansions are inserted literally.
pub fn expand_abbreviations(lexicon: &Lexicon, text: &str) -> String {
    let mut out = text.to_string();
    for rule in lexicon.abbreviations() {
        if rule.regex.is_match(&out) {
            out = rule
                .regex
                .replace_all(&out, NoExpand(&rule.expansion))
                .into_owned();
        }
    }
    out
}

/// Number of distinct table abbreviations present in `text`.
pub fn count_abbreviations(lexicon: &Lexicon, text: &str) -> usize {
    lexicon
        .abbreviations()
        .iter()
        .filter(|rule| rule.regex.is_match(text))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex() -> Lexicon {
        Lexicon::standard().unwrap()
    }

    #[test]
    fn expands_whole_words() {
        assert_eq!(
            expand_abbreviations(&lex(), "hx of htn"),
            "history of hypertension"
        );
    }

    #[test]
    fn ignores_substrings() {
        assert_eq!(expand_abbreviations(&lex(), "pathx"), "pathx");
    }

    #[test]
    fn is_case_insensitive() {
        assert_eq!(
            expand_abbreviations(&lex(), "progressive SOB, Hx DM"),
            "progressive shortness of breath, history diabetes mellitus"
        );
    }

    #[test]
    fn without_wins_over_with() {
        assert_eq!(
            expand_abbreviations(&lex(), "cough w/o fever"),
            "cough without fever"
        );
        assert_eq!(
            expand_abbreviations(&lex(), "seen w/family"),
            "seen withfamily"
        );
    }

    #[test]
    fn counts_distinct_abbreviations() {
        assert_eq!(count_abbreviations(&lex(), "hx hx htn and pathx"), 2);
        assert_eq!(count_abbreviations(&lex(), "nothing here"), 0);
    }
}
