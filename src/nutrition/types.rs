use serde::Deserialize;

/// Body of a Spoonacular product search response. Only the fields the bot
/// reads are modeled; a missing list means zero candidates.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// One product candidate. Both fields are optional in the upstream payload;
/// fallbacks are applied at reply-formatting time.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub title: Option<String>,
    pub calories: Option<f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Lookup timed out")]
    Timeout,
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
