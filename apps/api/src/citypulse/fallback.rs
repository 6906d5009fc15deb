//! Fixed payloads used when the analysis cannot produce model output.
//!
//! There are three sets, one per place the pipeline can give up:
//! - the model replied with JSON that lacks a field (`default_*`)
//! - the model reply could not be decoded at all (`classifier_fallback`)
//! - the page or the model could not be reached (`orchestration_fallback`)

use serde_json::{json, Value};

use crate::citypulse::models::Classification;

pub const DEFAULT_KEYWORDS: [&str; 4] = ["traffic", "urban", "planning", "development"];

pub const CLASSIFIER_FALLBACK_KEYWORDS: [&str; 6] = [
    "traffic",
    "urban",
    "planning",
    "development",
    "infrastructure",
    "community",
];

pub const ORCHESTRATION_FALLBACK_KEYWORDS: [&str; 10] = [
    "traffic",
    "urban",
    "planning",
    "development",
    "infrastructure",
    "community",
    "roads",
    "transport",
    "housing",
    "parks",
];

pub const CLASSIFIER_FALLBACK_MOOD: &str = "Analyzing website content";

/// Keywords used when the model reply has no `keywords` field.
pub fn default_keywords() -> Value {
    json!(DEFAULT_KEYWORDS)
}

/// Sentiment used when the model reply has no `sentiment` field.
pub fn default_sentiment() -> Value {
    json!({
        "positive": 30,
        "neutral": 40,
        "negative": 30,
        "community_mood": "Mixed opinions"
    })
}

pub fn classifier_fallback() -> Classification {
    Classification {
        keywords: json!(CLASSIFIER_FALLBACK_KEYWORDS),
        sentiment: json!({
            "positive": 35,
            "neutral": 35,
            "negative": 30,
            "community_mood": CLASSIFIER_FALLBACK_MOOD
        }),
    }
}

pub fn orchestration_fallback(url: &str) -> Classification {
    Classification {
        keywords: json!(ORCHESTRATION_FALLBACK_KEYWORDS),
        sentiment: json!({
            "positive": 25,
            "neutral": 40,
            "negative": 35,
            "key_issues": ["Website analysis failed", "Using fallback data"],
            "community_mood": format!("Could not access {url}")
        }),
    }
}
