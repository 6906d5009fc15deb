//! Classifier: asks the model for keywords and sentiment and decodes its reply.

use serde::de::Error as _;
use serde_json::Value;
use tracing::{debug, warn};

use crate::citypulse::fallback::{classifier_fallback, default_keywords, default_sentiment};
use crate::citypulse::models::Classification;
use crate::citypulse::pipeline::AnalysisOutcome;
use crate::citypulse::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYST_SYSTEM, MAX_TOKENS, TEMPERATURE};
use crate::llm_client::{strip_json_fences, CompletionModel, CompletionRequest, LlmError};

/// Classifies an excerpt.
///
/// Undecodable or empty replies resolve to the classifier fallback. Transport and
/// API failures of the completion call are returned as errors for the caller to handle.
pub async fn classify(
    excerpt: &str,
    model: &dyn CompletionModel,
) -> Result<AnalysisOutcome, LlmError> {
    let prompt = ANALYSIS_PROMPT_TEMPLATE.replace("{content}", excerpt);
    let request = CompletionRequest {
        system: ANALYST_SYSTEM,
        prompt: &prompt,
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
    };

    let reply = match model.complete(request).await {
        Ok(reply) => reply,
        Err(LlmError::EmptyContent) => {
            warn!("Model returned no content, using classifier fallback");
            return Ok(AnalysisOutcome::ClassifierFallback(classifier_fallback()));
        }
        Err(e) => return Err(e),
    };

    match decode_reply(&reply) {
        Ok(classification) => {
            debug!("Model reply decoded");
            Ok(AnalysisOutcome::Classified(classification))
        }
        Err(e) => {
            warn!("Model reply is not analysis JSON ({e}), using classifier fallback");
            Ok(AnalysisOutcome::ClassifierFallback(classifier_fallback()))
        }
    }
}

/// Decodes a raw model reply. The reply must be a JSON object; its `keywords`
/// and `sentiment` values are taken as they are, and a missing key takes its default.
fn decode_reply(reply: &str) -> Result<Classification, serde_json::Error> {
    let value: Value = serde_json::from_str(strip_json_fences(reply))?;
    let Value::Object(mut fields) = value else {
        return Err(serde_json::Error::custom("reply is not a JSON object"));
    };

    Ok(Classification {
        keywords: fields.remove("keywords").unwrap_or_else(default_keywords),
        sentiment: fields.remove("sentiment").unwrap_or_else(default_sentiment),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::citypulse::fallback::{CLASSIFIER_FALLBACK_KEYWORDS, CLASSIFIER_FALLBACK_MOOD};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Replies with a fixed result and records the last prompt it saw.
    struct CannedModel {
        reply: fn() -> Result<String, LlmError>,
        seen: Mutex<Option<(String, String, u32, f32)>>,
    }

    impl CannedModel {
        fn new(reply: fn() -> Result<String, LlmError>) -> Self {
            Self {
                reply,
                seen: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl CompletionModel for CannedModel {
        async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
            *self.seen.lock().unwrap() = Some((
                request.system.to_string(),
                request.prompt.to_string(),
                request.max_tokens,
                request.temperature,
            ));
            (self.reply)()
        }
    }

    const FULL_REPLY: &str = r#"{"keywords": ["traffic", "congestion"], "sentiment": {"positive": 10, "neutral": 20, "negative": 70, "community_mood": "Frustrated"}}"#;

    #[tokio::test]
    async fn test_well_formed_reply_is_passed_through() {
        let model = CannedModel::new(|| Ok(FULL_REPLY.to_string()));
        let outcome = classify("Traffic congestion is terrible here", &model)
            .await
            .unwrap();

        let AnalysisOutcome::Classified(classification) = outcome else {
            panic!("expected model classification");
        };
        assert_eq!(classification.keywords, json!(["traffic", "congestion"]));
        assert_eq!(classification.sentiment["community_mood"], "Frustrated");
        assert_eq!(classification.sentiment["negative"], 70);
    }

    #[tokio::test]
    async fn test_prompt_carries_excerpt_and_sampling_settings() {
        let model = CannedModel::new(|| Ok(FULL_REPLY.to_string()));
        classify("Bike lanes on Main Street", &model).await.unwrap();

        let (system, prompt, max_tokens, temperature) = model.seen.lock().unwrap().clone().unwrap();
        assert_eq!(system, ANALYST_SYSTEM);
        assert!(prompt.contains("Content: Bike lanes on Main Street"));
        assert!(prompt.contains(r#""keywords": array of 15-20"#));
        assert_eq!(max_tokens, 500);
        assert!((temperature - 0.3).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_missing_fields_take_defaults() {
        let model = CannedModel::new(|| Ok(r#"{"summary": "n/a"}"#.to_string()));
        let outcome = classify("x", &model).await.unwrap();

        let AnalysisOutcome::Classified(classification) = outcome else {
            panic!("expected model classification");
        };
        assert_eq!(
            classification.keywords,
            json!(["traffic", "urban", "planning", "development"])
        );
        assert_eq!(classification.sentiment["community_mood"], "Mixed opinions");
        assert_eq!(classification.sentiment["neutral"], 40);
    }

    #[tokio::test]
    async fn test_non_json_reply_uses_classifier_fallback() {
        let model = CannedModel::new(|| Ok("Sure! Here are the keywords: traffic, parks".to_string()));
        let outcome = classify("x", &model).await.unwrap();

        let AnalysisOutcome::ClassifierFallback(classification) = outcome else {
            panic!("expected classifier fallback");
        };
        assert_eq!(classification.keywords, json!(CLASSIFIER_FALLBACK_KEYWORDS));
        assert_eq!(classification.sentiment["community_mood"], CLASSIFIER_FALLBACK_MOOD);
    }

    #[tokio::test]
    async fn test_json_array_reply_uses_classifier_fallback() {
        let model = CannedModel::new(|| Ok(r#"["traffic", "parks"]"#.to_string()));
        let outcome = classify("x", &model).await.unwrap();
        assert!(matches!(outcome, AnalysisOutcome::ClassifierFallback(_)));
    }

    #[tokio::test]
    async fn test_empty_content_uses_classifier_fallback() {
        let model = CannedModel::new(|| Err(LlmError::EmptyContent));
        let outcome = classify("x", &model).await.unwrap();
        assert!(matches!(outcome, AnalysisOutcome::ClassifierFallback(_)));
    }

    #[tokio::test]
    async fn test_api_failure_is_returned_to_caller() {
        let model = CannedModel::new(|| {
            Err(LlmError::Api {
                status: 401,
                message: "Incorrect API key provided".to_string(),
            })
        });
        let err = classify("x", &model).await.unwrap_err();
        assert!(err.to_string().contains("Incorrect API key provided"));
    }

    #[tokio::test]
    async fn test_missing_choices_is_returned_to_caller() {
        let model = CannedModel::new(|| Err(LlmError::NoChoices));
        let err = classify("x", &model).await.unwrap_err();
        assert!(matches!(err, LlmError::NoChoices));
    }

    #[test]
    fn test_fenced_reply_is_unwrapped() {
        let reply = format!("```json\n{FULL_REPLY}\n```");
        let classification = decode_reply(&reply).unwrap();
        assert_eq!(classification.keywords, json!(["traffic", "congestion"]));
    }

    #[test]
    fn test_string_percentages_are_echoed() {
        let reply = r#"{"keywords": ["traffic", "congestion"], "sentiment": {"positive": "10%", "neutral": "20%", "negative": "70%", "community_mood": "Frustrated"}}"#;
        let classification = decode_reply(reply).unwrap();
        assert_eq!(classification.keywords, json!(["traffic", "congestion"]));
        assert_eq!(classification.sentiment["positive"], "10%");
        assert_eq!(classification.sentiment["community_mood"], "Frustrated");
    }

    #[test]
    fn test_sentiment_without_mood_is_echoed() {
        let reply = r#"{"keywords": ["parks"], "sentiment": {"positive": 60, "neutral": 30, "negative": 10, "key_issues": [1, "shade"]}}"#;
        let classification = decode_reply(reply).unwrap();
        assert_eq!(classification.keywords, json!(["parks"]));
        assert_eq!(
            classification.sentiment,
            json!({"positive": 60, "neutral": 30, "negative": 10, "key_issues": [1, "shade"]})
        );
    }

    #[test]
    fn test_null_fields_are_echoed_not_defaulted() {
        let classification = decode_reply(r#"{"keywords": null, "sentiment": null}"#).unwrap();
        assert!(classification.keywords.is_null());
        assert!(classification.sentiment.is_null());
    }

    #[test]
    fn test_unnormalized_percentages_are_kept() {
        let reply = r#"{"keywords": [], "sentiment": {"positive": 80, "neutral": 80, "negative": 80, "community_mood": "Loud"}}"#;
        let classification = decode_reply(reply).unwrap();
        assert_eq!(classification.keywords, json!([]));
        assert_eq!(classification.sentiment["positive"], 80);
    }
}
