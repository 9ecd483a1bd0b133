use serde::Deserialize;

/// Request payload for POST /api/summarize.
#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    /// Raw clinical note. Missing is treated as empty (and fails validation).
    #[serde(default)]
    pub note: String,
}
