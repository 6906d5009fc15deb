//! Axum route handlers for PlanIt.

use axum::Json;
use chrono::Local;

use crate::errors::AppJson;
use crate::models::ticket::{file_issue_report, IssueTicket};
use crate::planit::models::{SceneRequest, StreetScene};
use crate::planit::scene::generate_scene;

pub const TICKET_PREFIX: &str = "PLANIT";

/// POST /planit
pub async fn handle_generate(AppJson(request): AppJson<SceneRequest>) -> Json<StreetScene> {
    Json(run_generate(&request))
}

pub fn run_generate(request: &SceneRequest) -> StreetScene {
    generate_scene(request, &mut rand::thread_rng(), Local::now().naive_local())
}

/// POST /planit/report-issue
pub async fn handle_report_issue() -> Json<IssueTicket> {
    Json(file_issue_report(TICKET_PREFIX, &mut rand::thread_rng()))
}
