use std::sync::Arc;

use crate::citypulse::fetcher::PageFetcher;
use crate::llm_client::CompletionModel;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds only immutable collaborators; no request writes to it.
#[derive(Clone)]
pub struct AppState {
    /// Page source for CityPulse. Default: `HttpPageFetcher`.
    pub fetcher: Arc<dyn PageFetcher>,
    /// Completion model for CityPulse. Default: `LlmClient`.
    pub llm: Arc<dyn CompletionModel>,
}
