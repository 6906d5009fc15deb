//! CityPulse pipeline: fetch → extract → classify, with a fallback at each tier.
//!
//! The pipeline never fails. Every path ends in an `AnalysisOutcome`, and every
//! outcome renders to the same wire shape with status `success`. The outcome keeps
//! the tier that produced it so callers and tests can tell the paths apart.

use thiserror::Error;
use tracing::{debug, warn};

use crate::citypulse::classifier::classify;
use crate::citypulse::extractor::extract_excerpt;
use crate::citypulse::fallback::orchestration_fallback;
use crate::citypulse::fetcher::{FetchError, PageFetcher};
use crate::citypulse::models::{AnalysisResult, Classification};
use crate::llm_client::{CompletionModel, LlmError};
use crate::models::status::Status;

/// Failures that abandon the pipeline and trigger the orchestration fallback.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Completion(#[from] LlmError),

    #[error("Extraction task failed: {0}")]
    Extraction(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// The model answered with decodable JSON.
    Classified(Classification),
    /// The model answered, but its reply could not be decoded.
    ClassifierFallback(Classification),
    /// The page or the model could not be reached.
    OrchestrationFallback {
        classification: Classification,
        cause: String,
    },
}

impl AnalysisOutcome {
    /// Collapses the outcome into the response body for `url`.
    pub fn into_result(self, url: &str) -> AnalysisResult {
        let (classification, message) = match self {
            AnalysisOutcome::Classified(c) | AnalysisOutcome::ClassifierFallback(c) => {
                (c, format!("Analyzed content from {url}"))
            }
            AnalysisOutcome::OrchestrationFallback {
                classification,
                cause,
            } => (
                classification,
                format!("Fallback analysis for {url} (Error: {cause})"),
            ),
        };

        AnalysisResult {
            wordcloud: classification.keywords,
            sentiment: classification.sentiment,
            status: Status::Success,
            message,
        }
    }
}

/// Runs the full analysis for `url`.
pub async fn analyze_url(
    url: &str,
    fetcher: &dyn PageFetcher,
    model: &dyn CompletionModel,
) -> AnalysisOutcome {
    match run_stages(url, fetcher, model).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("Analysis of {url} failed, using fallback: {e}");
            AnalysisOutcome::OrchestrationFallback {
                classification: orchestration_fallback(url),
                cause: e.to_string(),
            }
        }
    }
}

async fn run_stages(
    url: &str,
    fetcher: &dyn PageFetcher,
    model: &dyn CompletionModel,
) -> Result<AnalysisOutcome, AnalysisError> {
    debug!("Fetching {url}");
    let html = fetcher.fetch(url).await?;

    // HTML parsing is CPU-bound.
    let excerpt = tokio::task::spawn_blocking(move || extract_excerpt(&html)).await?;
    debug!("Extracted {} characters from {url}", excerpt.chars().count());

    Ok(classify(&excerpt, model).await?)
}
