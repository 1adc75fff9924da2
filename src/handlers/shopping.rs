use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::HandlerContext;
use crate::ai::common::complete_json;
use crate::ai::prompts::shopping_prompt;
use crate::ai::ReasoningClient;
use crate::bill::{Amount, Bill, RequestedItem};
use crate::error::HandlerError;

#[derive(Deserialize)]
struct ShoppingJson {
    #[serde(default)]
    items: Vec<RequestedItem>,
    /// Only used to note a correction, so anything unreadable counts as absent.
    #[serde(default)]
    total: Option<Value>,
}

/// Prices a shopping list: breakdown table, calculation steps and total.
#[instrument(level = "trace", skip(ctx))]
pub async fn answer_shopping_list<C>(
    ctx: &HandlerContext<'_, C>,
    question: &str,
) -> Result<String, HandlerError>
where
    C: ReasoningClient + ?Sized,
{
    let reply: ShoppingJson =
        complete_json(ctx.client, &shopping_prompt(ctx.catalog_json), question).await?;
    let declared_total = reply.total.as_ref().and_then(Amount::from_json);
    debug!(items = reply.items.len(), ?declared_total, "Shopping list extracted");
    if reply.items.is_empty() {
        return Err(HandlerError::Unusable(
            "no items extracted from shopping list".into(),
        ));
    }
    let bill = Bill::price(ctx.catalog, &reply.items, declared_total, ctx.currency);
    Ok(bill.render())
}
