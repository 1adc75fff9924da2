use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::HandlerContext;
use crate::ai::common::complete_json;
use crate::ai::prompts::category_prompt;
use crate::ai::ReasoningClient;
use crate::catalog::Catalog;
use crate::error::HandlerError;
use crate::messages;

#[derive(Deserialize)]
struct CategoryJson {
    #[serde(default)]
    category: Option<Value>,
}

/// Lists the items of `requested`, or the available categories when no
/// category by that name exists.
pub fn format_category(catalog: &Catalog, requested: &str) -> String {
    match catalog.items_in_category(requested) {
        Some((category, items)) => {
            let mut lines = vec![messages::category_header(category)];
            lines.extend(
                items
                    .iter()
                    .map(|item| format!("- {}: {}", item.name, item.price_label())),
            );
            lines.join("\n")
        }
        None => messages::unknown_category(requested, &catalog.categories()),
    }
}

#[instrument(level = "trace", skip(ctx))]
pub async fn answer_category_query<C>(
    ctx: &HandlerContext<'_, C>,
    question: &str,
) -> Result<String, HandlerError>
where
    C: ReasoningClient + ?Sized,
{
    let prompt = category_prompt(ctx.catalog_json, &ctx.catalog.categories());
    let reply: CategoryJson = complete_json(ctx.client, &prompt, question).await?;
    let requested = match reply.category {
        Some(Value::String(name)) => name,
        _ => String::new(),
    };
    debug!(category = %requested, "Category query");
    Ok(format_category(ctx.catalog, &requested))
}
