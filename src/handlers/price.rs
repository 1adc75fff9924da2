use serde::Deserialize;
use tracing::{debug, instrument};

use super::HandlerContext;
use crate::ai::common::complete_json;
use crate::ai::prompts::price_prompt;
use crate::ai::ReasoningClient;
use crate::bill::{price_requested, RequestedItem};
use crate::catalog::Catalog;
use crate::error::HandlerError;
use crate::messages;

/// Models answer with bare names or with name/quantity/unit objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum PriceEntry {
    Name(String),
    Item(RequestedItem),
}

impl From<PriceEntry> for RequestedItem {
    fn from(entry: PriceEntry) -> Self {
        match entry {
            PriceEntry::Name(name) => RequestedItem::named(&name),
            PriceEntry::Item(item) => item,
        }
    }
}

#[derive(Deserialize)]
struct PriceJson {
    #[serde(default)]
    items: Vec<PriceEntry>,
}

/// States the unit price of each item. Converts only when an amount was
/// asked for, e.g. `500 g` of an item sold per `200 gm`.
pub fn format_prices(catalog: &Catalog, requested: &[RequestedItem]) -> String {
    let mut listed: Vec<&str> = Vec::new();
    let mut lines = Vec::new();
    for entry in requested {
        let Some(item) = catalog.find(&entry.name) else {
            lines.push(messages::not_in_catalog(entry.name.trim()));
            continue;
        };
        let price = messages::price_line(&item.name, &item.price_label());
        if !entry.wants_amount() {
            if !listed.contains(&item.name.as_str()) {
                listed.push(&item.name);
                lines.push(price);
            }
            continue;
        }
        match price_requested(item, entry) {
            Ok(line) => lines.push(messages::priced_amount(
                &price,
                &line.quantity_label(),
                &line.amount.display(&item.currency),
            )),
            Err(skip) => {
                lines.push(price);
                lines.push(skip.describe());
            }
        }
    }
    lines.join("\n")
}

#[instrument(level = "trace", skip(ctx))]
pub async fn answer_price_query<C>(
    ctx: &HandlerContext<'_, C>,
    question: &str,
) -> Result<String, HandlerError>
where
    C: ReasoningClient + ?Sized,
{
    let reply: PriceJson =
        complete_json(ctx.client, &price_prompt(ctx.catalog_json), question).await?;
    let requested: Vec<RequestedItem> = reply
        .items
        .into_iter()
        .map(RequestedItem::from)
        .filter(|r| !r.name.trim().is_empty())
        .collect();
    debug!(?requested, "Price query items");
    if requested.is_empty() {
        return Err(HandlerError::Unusable("no items named in price query".into()));
    }
    Ok(format_prices(ctx.catalog, &requested))
}
