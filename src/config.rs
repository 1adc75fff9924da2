use std::env;

use crate::ai::config::AiConfig;

pub const DEFAULT_DB_URL: &str = "sqlite:grocery.db";
pub const DEFAULT_CURRENCY: &str = "INR";

#[derive(Clone, Debug)]
pub struct Config {
    pub db_url: String,
    /// Used for rows without a currency and for the welcome banner.
    pub currency: String,
    pub ai: AiConfig,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let db_url = env::var("DB_URL").unwrap_or_else(|_| DEFAULT_DB_URL.to_string());
        let currency = env::var("CURRENCY")
            .ok()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        let ai = AiConfig::from_env();
        Self {
            db_url,
            currency,
            ai,
        }
    }
}
