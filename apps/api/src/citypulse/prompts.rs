// All LLM prompt constants for CityPulse.

/// System prompt fixing the analyst role and JSON-only output.
pub const ANALYST_SYSTEM: &str = "You are an urban planning analyst. Return only valid JSON.";

/// Analysis prompt template. Replace `{content}` with the page excerpt before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"
Analyze this website content for urban planning keywords and sentiment.

Content: {content}

Return JSON with:
1. "keywords": array of 15-20 urban planning related keywords found
2. "sentiment": object with "positive", "neutral", "negative" percentages and "community_mood"
"#;

pub const MAX_TOKENS: u32 = 500;
pub const TEMPERATURE: f32 = 0.3;
