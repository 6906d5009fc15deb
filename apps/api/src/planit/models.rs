use serde::{Deserialize, Serialize};

use crate::models::status::Status;

fn default_version() -> String {
    "1.0".to_string()
}

fn default_mode() -> String {
    "Pedestrian".to_string()
}

/// Body of `POST /planit`.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneRequest {
    pub city: String,
    pub street: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StreetConditions {
    pub lighting: String,
    pub pedestrian_count: String,
    pub current_time: String,
    pub rain_chance: String,
    pub temperature: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArViewData {
    pub buildings: Vec<String>,
    pub green_spaces: Vec<String>,
    pub infrastructure: Vec<String>,
    pub safety_rating: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StreetScene {
    pub location: String,
    pub scenario_version: String,
    pub ar_mode: String,
    pub generated_at: String,
    pub street_conditions: StreetConditions,
    pub ar_view_data: ArViewData,
    pub collaboration_notes: String,
    pub status: Status,
}
