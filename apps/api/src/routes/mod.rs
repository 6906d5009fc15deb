pub mod health;
pub mod samples;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::citypulse;
use crate::errors::AppError;
use crate::planit;
use crate::state::AppState;
use crate::zoner;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // CityPulse
        .route("/citypulse", post(citypulse::handlers::handle_analyze))
        // Zoner
        .route(
            "/zoner/load-document",
            post(zoner::handlers::handle_load_document),
        )
        .route("/zoner/query", post(zoner::handlers::handle_query))
        .route("/zoner/regenerate", post(zoner::handlers::handle_regenerate))
        .route(
            "/zoner/report-issue",
            post(zoner::handlers::handle_report_issue),
        )
        // PlanIt
        .route("/planit", post(planit::handlers::handle_generate))
        .route(
            "/planit/report-issue",
            post(planit::handlers::handle_report_issue),
        )
        // Sample runs
        .route("/test/citypulse", get(samples::citypulse_sample))
        .route("/test/zoner", get(samples::zoner_sample))
        .route("/test/planit", get(samples::planit_sample))
        .fallback(not_found)
        .with_state(state)
}
