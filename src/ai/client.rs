use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument, trace, warn};

use crate::ai::common::{build_chat_body, parse_chat_content};
use crate::ai::config::AiConfig;
use crate::error::AiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub user: &'a str,
    pub format: ResponseFormat,
}

/// The language model the assistant asks to classify questions, extract
/// structured fields and answer free-form questions.
#[async_trait]
pub trait ReasoningClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, AiError>;
}

/// [`ReasoningClient`] over an OpenAI-compatible chat completions endpoint
/// (Ollama, OpenAI).
#[derive(Clone, Debug)]
pub struct ChatClient {
    http: reqwest::Client,
    config: AiConfig,
}

impl ChatClient {
    pub fn new(config: AiConfig) -> Result<Self, AiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }
}

#[async_trait]
impl ReasoningClient for ChatClient {
    #[instrument(level = "trace", skip(self, request), fields(format = ?request.format))]
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, AiError> {
        let url = self.config.chat_url.as_str();
        debug!(url, model = %self.config.model, "sending chat completion request");

        let body = build_chat_body(&self.config.model, &request);
        let mut builder = self.http.post(url).json(&body);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }
        let resp = builder.send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            warn!(%status, "model API error");
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let raw = resp.text().await?;
        let snippet: String = raw.chars().take(200).collect();
        debug!(snippet = %snippet, "chat response body");
        trace!(raw = %raw, "chat response");
        parse_chat_content(&raw)
    }
}
