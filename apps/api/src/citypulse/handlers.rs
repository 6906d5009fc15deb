//! Axum route handlers for CityPulse.

use axum::{extract::State, Json};

use crate::citypulse::models::{AnalysisRequest, AnalysisResult};
use crate::citypulse::pipeline::analyze_url;
use crate::errors::AppJson;
use crate::state::AppState;

/// POST /citypulse
///
/// Analyzes the page at `text`. Always answers 200; degraded results say so in `message`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    AppJson(request): AppJson<AnalysisRequest>,
) -> Json<AnalysisResult> {
    Json(run_analysis(&state, &request).await)
}

pub async fn run_analysis(state: &AppState, request: &AnalysisRequest) -> AnalysisResult {
    let outcome = analyze_url(&request.text, state.fetcher.as_ref(), state.llm.as_ref()).await;
    outcome.into_result(&request.text)
}
