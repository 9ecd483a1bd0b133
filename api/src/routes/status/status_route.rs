use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::{SecondsFormat, Utc};
use tracing::debug;

use crate::{
    API_VERSION,
    core::app_state::AppState,
    routes::status::status_response::{FeatureFlags, StatusResponse},
};

/// Handler: GET /api/status
pub async fn status_route(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let ai_enabled = state.ai_enabled();
    debug!(ai_enabled, "status requested");

    Json(StatusResponse {
        status: "online",
        version: API_VERSION,
        features: FeatureFlags::with_ai(ai_enabled),
        github_models_api: if ai_enabled {
            "configured"
        } else {
            "not configured"
        },
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
