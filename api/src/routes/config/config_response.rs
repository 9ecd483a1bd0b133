use serde::Serialize;

/// Response payload for GET /api/config.
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub app_name: &'static str,
    pub version: &'static str,
    pub features: &'static [&'static str],
    pub max_note_length: usize,
    pub min_note_length: usize,
}
