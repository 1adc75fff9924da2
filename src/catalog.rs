use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::db::{fetch_grocery_rows, Database, GroceryRow};
use crate::error::AssistantError;
use crate::units::{Money, Quantity};

/// A single priced item from the catalog. Never modified after load.
#[derive(Debug, Clone, PartialEq)]
pub struct GroceryItem {
    pub name: String,
    pub price: Money,
    pub category: String,
    pub unit: String,
    pub currency: String,
}

impl GroceryItem {
    pub fn new(
        name: impl Into<String>,
        price: Money,
        category: impl Into<String>,
        unit: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            category: category.into(),
            unit: unit.into(),
            currency: currency.into(),
        }
    }

    fn from_row(row: GroceryRow, default_currency: &str) -> Self {
        Self {
            name: row.name.trim().to_string(),
            price: Money::from_major(row.price),
            category: row.category.unwrap_or_default(),
            unit: row.unit.unwrap_or_default(),
            currency: row
                .currency
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| default_currency.to_string()),
        }
    }

    /// The quantity one catalog price buys, parsed from the unit text.
    pub fn basis(&self) -> Option<Quantity> {
        Quantity::parse_basis(&self.unit)
    }

    /// `₹65.00 per 1 liter`
    pub fn price_label(&self) -> String {
        if self.unit.is_empty() {
            self.price.display(&self.currency)
        } else {
            format!("{} per {}", self.price.display(&self.currency), self.unit)
        }
    }
}

#[derive(Serialize)]
struct PromptItem<'a> {
    name: &'a str,
    price: f64,
    category: &'a str,
    unit: &'a str,
    currency: &'a str,
}

/// The in-memory snapshot of grocery items for a session.
///
/// Built once and then only read. The name index is case-insensitive; when
/// two items share a name the later one wins.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<GroceryItem>,
    by_name: HashMap<String, usize>,
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn stem(word: &str) -> String {
    if let Some(base) = word.strip_suffix("ies") {
        format!("{base}y")
    } else if let Some(base) = word.strip_suffix("oes") {
        base.to_string() + "o"
    } else if word.ends_with('s') && !word.ends_with("ss") {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

fn stem_phrase(text: &str) -> String {
    text.split(' ').map(stem).collect::<Vec<_>>().join(" ")
}

/// Full name plus the parts around and inside parentheses:
/// `Atta (Wheat Flour)` gives `atta (wheat flour)`, `atta`, `wheat flour`.
fn aliases(name: &str) -> Vec<String> {
    let full = normalize(name);
    let mut out = vec![full.clone()];
    if let Some((outer, rest)) = full.split_once('(') {
        let inner = rest.trim_end_matches(')');
        for part in [outer, inner] {
            let part = normalize(part);
            if !part.is_empty() {
                out.push(part);
            }
        }
    }
    out
}

impl Catalog {
    pub fn new(items: Vec<GroceryItem>) -> Self {
        let by_name = items
            .iter()
            .enumerate()
            .map(|(idx, item)| (normalize(&item.name), idx))
            .collect();
        Self { items, by_name }
    }

    pub fn items(&self) -> &[GroceryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct names in the lookup index.
    pub fn lookup_len(&self) -> usize {
        self.by_name.len()
    }

    /// Exact, case-insensitive lookup by name.
    pub fn get(&self, name: &str) -> Option<&GroceryItem> {
        self.by_name
            .get(&normalize(name))
            .map(|&idx| &self.items[idx])
    }

    /// Resolves a loosely written item name: exact name first, then a
    /// parenthetical alias, then singular/plural forms, then a substring
    /// that matches exactly one item.
    pub fn find(&self, name: &str) -> Option<&GroceryItem> {
        let key = normalize(name);
        if key.is_empty() {
            return None;
        }
        if let Some(item) = self.get(&key) {
            return Some(item);
        }

        if let Some(item) = self.items.iter().find(|i| aliases(&i.name).contains(&key)) {
            return Some(item);
        }

        let key_stem = stem_phrase(&key);
        if let Some(item) = self
            .items
            .iter()
            .find(|i| aliases(&i.name).iter().any(|a| stem_phrase(a) == key_stem))
        {
            return Some(item);
        }

        let mut partial = self
            .items
            .iter()
            .filter(|i| {
                let name = normalize(&i.name);
                name.contains(&key) || name.contains(&key_stem)
            });
        match (partial.next(), partial.next()) {
            (Some(item), None) => Some(item),
            _ => None,
        }
    }

    /// Distinct category names, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self
            .items
            .iter()
            .map(|i| i.category.as_str())
            .filter(|c| !c.is_empty())
            .collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    /// Resolves a category name (case and plural insensitive) and returns its
    /// canonical spelling together with its items in catalog order.
    pub fn items_in_category(&self, requested: &str) -> Option<(&str, Vec<&GroceryItem>)> {
        let key = stem_phrase(&normalize(requested));
        if key.is_empty() {
            return None;
        }
        let category = self
            .categories()
            .into_iter()
            .find(|c| stem_phrase(&normalize(c)) == key)?;
        let items = self
            .items
            .iter()
            .filter(|i| i.category == category)
            .collect();
        Some((category, items))
    }

    /// Currency of the first item, or `fallback` for an empty catalog.
    pub fn currency<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.items
            .first()
            .map(|i| i.currency.as_str())
            .unwrap_or(fallback)
    }

    /// The catalog as pretty JSON, the context every prompt is given.
    pub fn to_prompt_json(&self) -> String {
        let rows: Vec<PromptItem<'_>> = self
            .items
            .iter()
            .map(|i| PromptItem {
                name: &i.name,
                price: i.price.as_major(),
                category: &i.category,
                unit: &i.unit,
                currency: &i.currency,
            })
            .collect();
        serde_json::to_string_pretty(&rows).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Result of loading the catalog. Loading never fails outright: when the
/// store is unreachable or empty the catalog is empty and `unavailable`
/// says why.
#[derive(Debug)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    pub unavailable: Option<AssistantError>,
}

pub async fn load(db: &Database, default_currency: &str) -> CatalogLoad {
    let rows = match fetch_grocery_rows(db).await {
        Ok(rows) => rows,
        Err(err) => {
            warn!(error = %err, "Failed to load grocery items");
            return CatalogLoad {
                catalog: Catalog::default(),
                unavailable: Some(AssistantError::DataUnavailable {
                    reason: err.to_string(),
                }),
            };
        }
    };

    let items: Vec<GroceryItem> = rows
        .into_iter()
        .map(|row| GroceryItem::from_row(row, default_currency))
        .collect();
    let catalog = Catalog::new(items);

    if catalog.is_empty() {
        warn!("Grocery catalog is empty");
        return CatalogLoad {
            catalog,
            unavailable: Some(AssistantError::DataUnavailable {
                reason: "grocery_items table is empty".to_string(),
            }),
        };
    }

    if catalog.lookup_len() != catalog.len() {
        debug!(
            items = catalog.len(),
            names = catalog.lookup_len(),
            "Duplicate item names in catalog, later rows win"
        );
    }
    info!(items = catalog.len(), "Loaded grocery items into memory");
    CatalogLoad {
        catalog,
        unavailable: None,
    }
}
