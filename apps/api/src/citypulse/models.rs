use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::status::Status;

fn default_budget() -> f64 {
    100_000.0
}

/// Body of `POST /citypulse`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    /// Target URL to analyze.
    pub text: String,
    // Accepted from the client but not used by the analysis.
    #[allow(dead_code)]
    #[serde(default = "default_budget")]
    pub budget: f64,
}

/// Keywords and sentiment for one page, from the model or from fallback constants.
///
/// Both are kept as raw JSON. Whatever the model put under `keywords` and
/// `sentiment` goes back to the client as is: percentages are not validated,
/// missing or extra sentiment fields are not filled in or dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub keywords: Value,
    pub sentiment: Value,
}

/// Response body of `POST /citypulse`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub wordcloud: Value,
    pub sentiment: Value,
    pub status: Status,
    pub message: String,
}
