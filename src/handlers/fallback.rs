use tracing::{debug, instrument};

use super::HandlerContext;
use crate::ai::prompts::fallback_prompt;
use crate::ai::{CompletionRequest, ReasoningClient, ResponseFormat};
use crate::error::AiError;
use crate::text_utils::clean_response;
use crate::units::currency_symbol;

/// Answers any grocery question in free text with the general-purpose prompt.
#[instrument(level = "trace", skip(ctx))]
pub async fn answer_fallback<C>(
    ctx: &HandlerContext<'_, C>,
    question: &str,
) -> Result<String, AiError>
where
    C: ReasoningClient + ?Sized,
{
    let symbol = currency_symbol(ctx.catalog.currency(ctx.currency));
    let system = fallback_prompt(ctx.catalog_json, symbol.trim_end());
    let reply = ctx
        .client
        .complete(CompletionRequest {
            system: &system,
            user: question,
            format: ResponseFormat::Text,
        })
        .await?;

    let answer = clean_response(&reply);
    if answer.is_empty() {
        return Err(AiError::Malformed(
            "fallback reply was empty after cleaning".into(),
        ));
    }
    debug!(len = answer.len(), "Fallback answer ready");
    Ok(answer)
}
