use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::ai::common::complete_json;
use crate::ai::prompts::classifier_prompt;
use crate::ai::ReasoningClient;
use crate::error::AiError;

/// What a question is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    PriceQuery,
    ShoppingList,
    CategoryQuery,
    ComparisonQuery,
    Unknown,
}

impl Intent {
    pub const ALL: [Intent; 5] = [
        Intent::PriceQuery,
        Intent::ShoppingList,
        Intent::CategoryQuery,
        Intent::ComparisonQuery,
        Intent::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Intent::PriceQuery => "price_query",
            Intent::ShoppingList => "shopping_list",
            Intent::CategoryQuery => "category_query",
            Intent::ComparisonQuery => "comparison_query",
            Intent::Unknown => "unknown",
        }
    }

    /// Maps a model label onto an intent; anything unrecognized is `Unknown`.
    pub fn from_label(label: &str) -> Intent {
        let label = label.trim().to_ascii_lowercase();
        Intent::ALL
            .into_iter()
            .find(|intent| intent.as_str() == label)
            .unwrap_or(Intent::Unknown)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize)]
struct ClassificationJson {
    #[serde(rename = "type", default)]
    kind: Option<Value>,
    #[serde(default)]
    explanation: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub intent: Intent,
    /// The model's reasoning. Logged, never acted on.
    pub explanation: String,
}

/// Asks the model which kind of question this is.
///
/// A missing or unrecognized `type` yields [`Intent::Unknown`]. Transport
/// errors and replies that are not a JSON object are returned to the caller.
#[instrument(level = "trace", skip(client))]
pub async fn classify<C>(client: &C, question: &str) -> Result<Classification, AiError>
where
    C: ReasoningClient + ?Sized,
{
    let reply: ClassificationJson = complete_json(client, &classifier_prompt(), question).await?;

    let intent = reply
        .kind
        .as_ref()
        .and_then(Value::as_str)
        .map(Intent::from_label)
        .unwrap_or(Intent::Unknown);
    let explanation = match reply.explanation {
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
        None => String::new(),
    };

    debug!(%intent, explanation = %explanation, "Classified question");
    Ok(Classification {
        intent,
        explanation,
    })
}
