use axum::Json;
use note_pipeline::{MAX_NOTE_CHARS, MIN_NOTE_CHARS};

use crate::{API_VERSION, APP_NAME, routes::config::config_response::ConfigResponse};

/// Human-readable capability list shown by the UI.
const FEATURES: &[&str] = &[
    "Abbreviation Expansion",
    "PII De-identification",
    "Clinical Section Extraction",
    "AI-Powered Summarization (with GitHub Models API)",
    "Red Flag Detection",
    "Hallucination Prevention",
    "Safety Compliance Checks",
    "RAG-Grounded Responses",
    "Diagnostic Question Detection",
];

/// Handler: GET /api/config
pub async fn config_route() -> Json<ConfigResponse> {
    Json(ConfigResponse {
        app_name: APP_NAME,
        version: API_VERSION,
        features: FEATURES,
        max_note_length: MAX_NOTE_CHARS,
        min_note_length: MIN_NOTE_CHARS,
    })
}
