use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Banner confirming the backend is up.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Urban Planning AI Backend is Running!",
        "status": "success"
    }))
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "urbanai-api"
    }))
}
