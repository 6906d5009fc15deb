//! Axum route handlers for Zoner.

use axum::Json;

use crate::errors::AppJson;
use crate::models::ticket::{file_issue_report, IssueTicket};
use crate::zoner::answers::{answer_query, load_document, regenerate_answer};
use crate::zoner::models::{LoadDocumentRequest, LoadedDocument, QueryAnswer, QueryRequest};

pub const TICKET_PREFIX: &str = "ZONER";

/// POST /zoner/load-document
pub async fn handle_load_document(
    AppJson(request): AppJson<LoadDocumentRequest>,
) -> Json<LoadedDocument> {
    Json(load_document(&request, &mut rand::thread_rng()))
}

/// POST /zoner/query
pub async fn handle_query(AppJson(request): AppJson<QueryRequest>) -> Json<QueryAnswer> {
    Json(answer_query(&request, &mut rand::thread_rng()))
}

/// POST /zoner/regenerate
///
/// Same lookup as `/zoner/query`, reworded with a random lead-in.
pub async fn handle_regenerate(AppJson(request): AppJson<QueryRequest>) -> Json<QueryAnswer> {
    Json(regenerate_answer(&request, &mut rand::thread_rng()))
}

/// POST /zoner/report-issue
pub async fn handle_report_issue() -> Json<IssueTicket> {
    Json(file_issue_report(TICKET_PREFIX, &mut rand::thread_rng()))
}
