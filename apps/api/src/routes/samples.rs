//! GET /test/*: run each tool once on a built-in sample request.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::citypulse::handlers::run_analysis;
use crate::citypulse::models::{AnalysisRequest, AnalysisResult};
use crate::planit::handlers::run_generate;
use crate::planit::models::{SceneRequest, StreetScene};
use crate::state::AppState;
use crate::zoner::answers::{answer_query, load_document};
use crate::zoner::models::{LoadDocumentRequest, LoadedDocument, QueryAnswer, QueryRequest};

pub const SAMPLE_FORUM_URL: &str = "https://example-city-forum.com/complaints";

#[derive(Debug, Serialize)]
pub struct ZonerSample {
    pub load_test: LoadedDocument,
    pub query_test: QueryAnswer,
}

/// GET /test/citypulse
pub async fn citypulse_sample(State(state): State<AppState>) -> Json<AnalysisResult> {
    let request = AnalysisRequest {
        text: SAMPLE_FORUM_URL.to_string(),
        budget: 500_000.0,
    };
    Json(run_analysis(&state, &request).await)
}

/// GET /test/zoner
pub async fn zoner_sample() -> Json<ZonerSample> {
    let load = LoadDocumentRequest {
        document_type: "Zoning By-law".to_string(),
        document_info: "City of Toronto Zoning Bylaw 569-2013".to_string(),
        upload_path: "sample-bylaw.pdf".to_string(),
    };
    let query = QueryRequest {
        query: "What are the height restrictions for residential buildings?".to_string(),
        document_type: "Zoning By-law".to_string(),
        document_info: String::new(),
    };

    let mut rng = rand::thread_rng();
    Json(ZonerSample {
        load_test: load_document(&load, &mut rng),
        query_test: answer_query(&query, &mut rng),
    })
}

/// GET /test/planit
pub async fn planit_sample() -> Json<StreetScene> {
    let request = SceneRequest {
        city: "Singapore".to_string(),
        street: "Orchard Road".to_string(),
        version: "1.0".to_string(),
        mode: "Pedestrian".to_string(),
        notes: "Testing AR street view generation".to_string(),
    };
    Json(run_generate(&request))
}
