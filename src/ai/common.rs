use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::trace;

use crate::ai::client::{CompletionRequest, ReasoningClient, ResponseFormat};
use crate::error::AiError;
use crate::text_utils::clean_response;

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// Builds a chat completion body with temperature pinned to zero.
pub fn build_chat_body(model: &str, request: &CompletionRequest<'_>) -> serde_json::Value {
    let mut body = json!({
        "model": model,
        "temperature": 0,
        "messages": [
            { "role": "system", "content": request.system },
            { "role": "user", "content": request.user },
        ]
    });
    if request.format == ResponseFormat::Json {
        body["response_format"] = json!({ "type": "json_object" });
    }
    body
}

/// Pulls the first choice's message text out of a raw chat response.
pub fn parse_chat_content(raw: &str) -> Result<String, AiError> {
    let chat: ChatResponse = serde_json::from_str(raw)?;
    let content = chat
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AiError::Malformed("missing chat choice".into()))?
        .message
        .content
        .unwrap_or_default();
    let content = content.trim();
    if content.is_empty() {
        return Err(AiError::Malformed("empty message content".into()));
    }
    Ok(content.to_string())
}

/// Finds the JSON object in a model reply, skipping reasoning blocks and
/// markdown fences around it.
pub fn extract_json_object(text: &str) -> Result<String, AiError> {
    let cleaned = clean_response(text);
    let start = cleaned.find('{');
    let end = cleaned.rfind('}');
    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(cleaned[start..=end].to_string()),
        _ => Err(AiError::Malformed(format!(
            "no JSON object in reply: {}",
            cleaned.chars().take(80).collect::<String>()
        ))),
    }
}

/// Sends a structured request and decodes the reply into `T`.
pub async fn complete_json<C, T>(client: &C, system: &str, user: &str) -> Result<T, AiError>
where
    C: ReasoningClient + ?Sized,
    T: DeserializeOwned,
{
    let reply = client
        .complete(CompletionRequest {
            system,
            user,
            format: ResponseFormat::Json,
        })
        .await?;
    let json = extract_json_object(&reply)?;
    trace!(json = %json, "structured reply");
    Ok(serde_json::from_str(&json)?)
}
