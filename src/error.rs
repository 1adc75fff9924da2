use thiserror::Error;

use crate::classifier::Intent;

/// Failures talking to the reasoning model.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("model request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed model response: {0}")]
    Malformed(String),

    #[error("invalid JSON in model response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures raised by a specialized intent handler.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error(transparent)]
    Ai(#[from] AiError),

    #[error("{0}")]
    Unusable(String),
}

/// Everything the assistant can fail with. Only `UnrecoverableFailure` ever
/// reaches the user, and then as a message rather than an error.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("catalog unavailable: {reason}")]
    DataUnavailable { reason: String },

    #[error("query classification failed: {0}")]
    ClassificationFailure(#[source] AiError),

    #[error("{intent} handler failed: {source}")]
    HandlerFailure {
        intent: Intent,
        #[source]
        source: HandlerError,
    },

    #[error("fallback answer failed: {0}")]
    UnrecoverableFailure(#[source] AiError),
}
