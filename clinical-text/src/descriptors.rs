use std::sync::LazyLock;

use regex::Regex;

static AGED_ADULT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:young|middle-aged|elderly|old)\s+adult\b").expect("descriptor regex")
});

static ADULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\badult\b").expect("adult regex"));

/// Drops vague age descriptors ("young adult", "adult") and trims.
pub fn clean_generic_descriptors(text: &str) -> String {
    let text = AGED_ADULT.replace_all(text, "");
    ADULT.replace_all(&text, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_descriptors() {
        assert_eq!(clean_generic_descriptors("  Young Adult  "), "");
        assert_eq!(clean_generic_descriptors("adult male, 45"), "male, 45");
        assert_eq!(clean_generic_descriptors("elderly adult female"), "female");
        assert_eq!(clean_generic_descriptors("adulthood"), "adulthood");
    }
}
