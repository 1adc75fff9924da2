use serde::Deserialize;
use tracing::{debug, instrument};

use super::HandlerContext;
use crate::ai::common::complete_json;
use crate::ai::prompts::comparison_prompt;
use crate::ai::ReasoningClient;
use crate::catalog::GroceryItem;
use crate::error::HandlerError;
use crate::messages;
use crate::units::{Money, Quantity, Unit};

#[derive(Deserialize)]
struct ItemsJson {
    #[serde(default)]
    items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparedItem<'a> {
    pub item: &'a GroceryItem,
    pub per_unit: Money,
    pub calculation: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Comparison<'a> {
    /// Prices normalized to one unit, in the order they were asked for.
    Ranked {
        unit: Unit,
        items: Vec<ComparedItem<'a>>,
    },
    /// The items are sold by different kinds of units.
    MixedUnits(Vec<&'a GroceryItem>),
}

fn normalize(item: &GroceryItem, basis: Quantity, unit: Unit) -> ComparedItem<'_> {
    let currency = item.currency.as_str();
    let per_unit = item.price.scale(unit.base_factor() / basis.base());
    let symbol = unit.symbol(false);
    let calculation = if basis == Quantity::new(1.0, unit) {
        format!("{}: {} per {}", item.name, per_unit.display(currency), symbol)
    } else {
        format!(
            "{}: {} ÷ {basis} × 1 {symbol} = {} per {symbol}",
            item.name,
            item.price.display(currency),
            per_unit.display(currency)
        )
    };
    ComparedItem {
        item,
        per_unit,
        calculation,
    }
}

/// Normalizes every item to a common unit (per kg, per liter or per piece).
pub fn compare<'a>(items: &[&'a GroceryItem]) -> Result<Comparison<'a>, HandlerError> {
    if items.len() < 2 {
        return Err(HandlerError::Unusable(
            "a comparison needs at least two catalog items".into(),
        ));
    }

    let bases: Option<Vec<Quantity>> = items.iter().map(|i| i.basis()).collect();
    let Some(bases) = bases else {
        return Ok(Comparison::MixedUnits(items.to_vec()));
    };
    let dimension = bases[0].dimension();
    if bases.iter().any(|b| b.dimension() != dimension) {
        return Ok(Comparison::MixedUnits(items.to_vec()));
    }

    let unit = dimension.comparison_unit();
    let compared = items
        .iter()
        .zip(bases)
        .map(|(&item, basis)| normalize(item, basis, unit))
        .collect();
    Ok(Comparison::Ranked {
        unit,
        items: compared,
    })
}

impl Comparison<'_> {
    pub fn render(&self) -> String {
        match self {
            Comparison::MixedUnits(items) => messages::cannot_compare_units(
                &items
                    .iter()
                    .map(|i| format!("{}: {}", i.name, i.price_label()))
                    .collect::<Vec<_>>(),
            ),
            Comparison::Ranked { unit, items } => render_ranked(*unit, items),
        }
    }
}

fn render_ranked(unit: Unit, items: &[ComparedItem<'_>]) -> String {
    let symbol = unit.symbol(false);
    let mut out = format!("Price per {symbol}:\n");
    for compared in items {
        out.push_str(&format!("- {}\n", compared.calculation));
    }
    out.push('\n');

    let mut ranked: Vec<&ComparedItem<'_>> = items.iter().collect();
    ranked.sort_by_key(|c| c.per_unit);
    let (Some(cheapest), Some(dearest)) = (ranked.first(), ranked.last()) else {
        return out;
    };
    let currency = cheapest.item.currency.as_str();

    if cheapest.per_unit == dearest.per_unit {
        out.push_str(&format!(
            "They all cost the same: {} per {symbol}.",
            cheapest.per_unit.display(currency)
        ));
    } else if ranked.len() == 2 {
        out.push_str(&format!(
            "{} is cheaper than {} by {} per {symbol}.",
            cheapest.item.name,
            dearest.item.name,
            (dearest.per_unit - cheapest.per_unit).display(currency)
        ));
    } else {
        out.push_str(&format!(
            "Cheapest: {} at {} per {symbol}. Most expensive: {} at {} per {symbol}.",
            cheapest.item.name,
            cheapest.per_unit.display(currency),
            dearest.item.name,
            dearest.per_unit.display(currency)
        ));
    }
    out
}

#[instrument(level = "trace", skip(ctx))]
pub async fn answer_comparison_query<C>(
    ctx: &HandlerContext<'_, C>,
    question: &str,
) -> Result<String, HandlerError>
where
    C: ReasoningClient + ?Sized,
{
    let reply: ItemsJson =
        complete_json(ctx.client, &comparison_prompt(ctx.catalog_json), question).await?;
    debug!(items = ?reply.items, "Comparison items");

    let mut found: Vec<&GroceryItem> = Vec::new();
    let mut missing = Vec::new();
    for name in reply.items.iter().filter(|n| !n.trim().is_empty()) {
        match ctx.catalog.find(name) {
            Some(item) if found.iter().any(|f| f.name == item.name) => {}
            Some(item) => found.push(item),
            None => missing.push(messages::not_in_catalog(name.trim())),
        }
    }

    let mut answer = compare(&found)?.render();
    for line in missing {
        answer.push('\n');
        answer.push_str(&line);
    }
    Ok(answer)
}
