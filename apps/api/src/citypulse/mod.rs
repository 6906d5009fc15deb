// CityPulse: website sentiment and keyword analysis.
// All LLM calls go through llm_client; page fetching goes through the PageFetcher trait.

pub mod classifier;
pub mod extractor;
pub mod fallback;
pub mod fetcher;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;
