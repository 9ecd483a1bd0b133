use serde::Serialize;

/// Which pipeline capabilities are active on this instance.
#[derive(Debug, Serialize)]
pub struct FeatureFlags {
    pub abbreviation_expansion: bool,
    pub deidentification: bool,
    pub section_extraction: bool,
    pub ai_summarization: bool,
    pub red_flag_detection: bool,
    pub hallucination_detection: bool,
    pub safety_checks: bool,
    pub diagnostic_question_detection: bool,
}

impl FeatureFlags {
    /// Everything is always on except AI summarization, which needs a token.
    pub fn with_ai(ai_enabled: bool) -> Self {
        Self {
            abbreviation_expansion: true,
            deidentification: true,
            section_extraction: true,
            ai_summarization: ai_enabled,
            red_flag_detection: true,
            hallucination_detection: true,
            safety_checks: true,
            diagnostic_question_detection: true,
        }
    }
}

/// Response payload for GET /api/status.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub features: FeatureFlags,
    pub github_models_api: &'static str,
    pub timestamp: String,
}
