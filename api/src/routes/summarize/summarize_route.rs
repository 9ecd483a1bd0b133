//! POST /api/summarize: runs one note through the pipeline.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use note_pipeline::NotePipeline;
use tracing::{info, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::summarize::{
        summarize_request::SummarizeRequest, summarize_response::SummarizeResponse,
    },
};

/// Handler: POST /api/summarize
///
/// Refusals and validation failures are `200` with `success: false`; only a
/// malformed body (`400`) or a crashed pipeline task (`500`) change the status.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:5000/api/summarize \
///   -H 'content-type: application/json' \
///   -d '{"note":"Pt Profile: 32yo male. HPI: progressive SOB for two days. PMH: DM."}'
/// ```
#[instrument(name = "summarize_route", skip_all)]
pub async fn summarize_route(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SummarizeRequest>, JsonRejection>,
) -> AppResult<Json<SummarizeResponse>> {
    let Json(SummarizeRequest { note }) = body?;
    let state_ai = state.ai_enabled();

    // A panic in the pipeline comes back as a JoinError (500).
    let result = tokio::spawn(async move {
        NotePipeline::new(&state.resources, state.llm.as_deref())
            .process(&note)
            .await
    })
    .await?;

    info!(success = result.is_success(), ai = state_ai, "summarize request handled");
    Ok(Json(result.into()))
}
