//! Prompt builder: fixed system role + policy context + extraction rules + note.

use clinical_text::{NOT_AVAILABLE, SectionKey, SectionSet};
use rag_base::RetrievedPolicy;

/// System instruction sent with every summary request.
pub const SYSTEM_PROMPT: &str =
    "You are a clinical documentation specialist. Provide summaries only, no diagnosis.";

const ROLE: &str = "You are a Clinical Documentation Specialist with 15+ years of experience.\n\n\
Your task is to summarize clinical notes into a professional, structured format.";

const RULES: &str = "STRICT RULES: \n\
- Only extract stated facts\n\
- NO diagnoses\n\
- NO treatments  \n\
- NO interpretations\n\
- If patient demographics are provided, use them EXACTLY as stated in the summary\n\
- Do NOT reformat or reinterpret the demographics";

/// Builds the user prompt.
///
/// Layout, in order: retrieved policies, role, rules, the demographics line
/// (only when extracted), the note, and the requested output format.
///
/// # Example
/// ```
/// # use clinical_text::SectionSet;
/// # use summarizer::prompt::build_user_prompt;
/// let prompt = build_user_prompt("cough for 3 days", &[], &SectionSet::new());
/// assert!(prompt.contains("Current Note:\ncough for 3 days"));
/// assert!(!prompt.contains("Patient Demographics: "));
/// ```
pub fn build_user_prompt(note: &str, policies: &[RetrievedPolicy<'_>], sections: &SectionSet) -> String {
    let mut out = String::from("Relevant Policies:\n");
    for p in policies {
        out.push_str(&format!("- {}: {}\n", p.document.title, p.document.content));
    }
    out.push('\n');
    out.push('\n');
    out.push_str(ROLE);
    out.push_str("\n\n");
    out.push_str(RULES);
    out.push_str("\n\n");

    let demographics = sections.get(SectionKey::Demographics);
    if let Some(d) = demographics {
        out.push_str(&format!("Patient Demographics: {d}\n"));
    }

    out.push_str("Current Note:\n");
    out.push_str(note);
    out.push_str("\n\nProvide a structured summary with the following format:\n");
    out.push_str(&format!(
        "**Patient Demographics:** {}\n",
        demographics.unwrap_or(NOT_AVAILABLE)
    ));
    out.push_str("**History of Present Illness:** [extract from note]\n");
    out.push_str("**Past Medical History:** [extract from note]\n");
    out.push_str("**Family History:** [extract from note]\n");
    out.push_str("**Notes:** [extract from note]\n\n");
    out.push_str("Professional Summary:");
    out
}

#[cfg(test)]
mod tests {
    use rag_base::{KeywordRetriever, PolicyCorpus};

    use super::*;

    #[test]
    fn embeds_policies_and_demographics_in_order() {
        let corpus = PolicyCorpus::standard();
        let policies = KeywordRetriever::new(&corpus).retrieve("stroke", 3);
        let mut sections = SectionSet::new();
        sections.set(SectionKey::Demographics, "32yo male - Gender: male");

        let prompt = build_user_prompt("patient seen after stroke", &policies, &sections);

        let policy = prompt.find("- Red Flag Escalation:").unwrap();
        let role = prompt.find("Clinical Documentation Specialist").unwrap();
        let rules = prompt.find("STRICT RULES").unwrap();
        let demo = prompt.find("Patient Demographics: 32yo male").unwrap();
        let note = prompt.find("Current Note:\npatient seen after stroke").unwrap();
        assert!(policy < role && role < rules && rules < demo && demo < note);
        assert!(prompt.ends_with("Professional Summary:"));
        assert!(prompt.contains("**Patient Demographics:** 32yo male - Gender: male"));
    }

    #[test]
    fn missing_demographics_use_placeholder() {
        let prompt = build_user_prompt("note", &[], &SectionSet::new());
        assert!(prompt.contains("**Patient Demographics:** Not available"));
    }
}
