use serde::{Deserialize, Serialize};

use crate::models::status::Status;

/// Body of `POST /zoner/load-document`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadDocumentRequest {
    pub document_type: String,
    pub document_info: String,
    #[serde(default)]
    pub upload_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadedDocument {
    pub document_type: String,
    pub document_info: String,
    pub upload_path: String,
    pub processing_status: String,
    pub document_summary: String,
    pub key_sections: Vec<String>,
    pub total_pages: u32,
    pub status: Status,
}

/// Body of `POST /zoner/query` and `POST /zoner/regenerate`.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default)]
    pub document_type: String,
    // Accepted for parity with load-document; answers do not depend on it.
    #[allow(dead_code)]
    #[serde(default)]
    pub document_info: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryAnswer {
    pub query: String,
    pub response: String,
    pub confidence_score: u32,
    pub relevant_sections: Vec<String>,
    pub citations: Vec<String>,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regenerated: Option<bool>,
}
