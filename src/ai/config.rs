use std::env;

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "deepseek-r1:32b";
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Clone, Debug)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub chat_url: String,
    pub timeout_secs: Option<u64>,
}

impl AiConfig {
    pub fn from_env() -> Self {
        let chat_url = env::var("CHAT_URL").unwrap_or_else(|_| {
            let base = env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OLLAMA_BASE_URL.to_string());
            chat_url_for(&base)
        });
        Self {
            api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            model: env::var("MODEL_NAME").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            chat_url,
            timeout_secs: env::var("MODEL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }
}

/// OpenAI-compatible chat endpoint served under `base`.
pub fn chat_url_for(base: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), CHAT_COMPLETIONS_PATH)
}
