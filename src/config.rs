use std::env;

const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub spoonacular_api_key: String,
    /// Externally reachable URL for Telegram to push updates to.
    /// When unset the bot falls back to long polling.
    pub webhook_url: Option<String>,
    pub port: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            telegram_bot_token: require("TELEGRAM_TOKEN")?,
            spoonacular_api_key: require("SPOONACULAR_KEY")?,
            webhook_url: env::var("WEBHOOK_URL").ok().filter(|v| !v.is_empty()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}
