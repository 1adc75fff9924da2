//! Deterministic shopping-list pricing.
//!
//! The model only tells us which items and quantities were asked for; every
//! amount and the total are computed here.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::catalog::{Catalog, GroceryItem};
use crate::messages;
use crate::units::{format_number, Dimension, Money, Quantity, Unit};

/// A quantity field as models tend to write it: a number or a numeric string.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// The numeric value, ignoring currency symbols, unit suffixes and
    /// thousands separators in text (`"₹1,250.50"`, `"2kg"`).
    pub fn value(&self) -> Option<f64> {
        match self {
            Amount::Number(n) => Some(*n),
            Amount::Text(t) => t
                .chars()
                .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
                .collect::<String>()
                .parse()
                .ok(),
        }
    }

    /// Reads any JSON value as an amount; anything that is not a number or
    /// a numeric string gives `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<f64> {
        Amount::deserialize(value).ok()?.value()
    }
}

/// Largest quantity accepted for one line.
pub const MAX_QUANTITY: f64 = 1e6;

/// One entry of the shopping list as extracted from the question.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RequestedItem {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<Amount>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl RequestedItem {
    pub fn new(name: &str, quantity: f64, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity: Some(Amount::Number(quantity)),
            unit: Some(unit.to_string()),
        }
    }

    /// An item asked about by name only.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity: None,
            unit: None,
        }
    }

    /// Whether a specific amount was asked for, not just the item.
    pub fn wants_amount(&self) -> bool {
        self.quantity.is_some() || self.unit.as_deref().is_some_and(|u| !u.trim().is_empty())
    }
}

/// How much of an item was asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Requested {
    /// A measured amount, converted against the catalog basis.
    Measured(Quantity),
    /// A bare number of catalog packs.
    Multiple(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BillLine {
    pub item: GroceryItem,
    pub requested: Requested,
    pub amount: Money,
    pub calculation: String,
}

impl BillLine {
    pub fn quantity_label(&self) -> String {
        match self.requested {
            Requested::Measured(q) => q.to_string(),
            Requested::Multiple(n) if self.item.unit.is_empty() => format_number(n),
            Requested::Multiple(n) => format!("{} × {}", format_number(n), self.item.unit),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Skipped {
    NotInCatalog(String),
    UnknownUnit { item: String, unit: String },
    UnitMismatch { item: String, requested: String, basis: String },
    InvalidQuantity(String),
}

impl Skipped {
    pub fn describe(&self) -> String {
        match self {
            Skipped::NotInCatalog(name) => format!("{name}: not in the catalog"),
            Skipped::UnknownUnit { item, unit } => format!("{item}: unknown unit \"{unit}\""),
            Skipped::UnitMismatch {
                item,
                requested,
                basis,
            } => format!("{item}: {requested} cannot be priced per {basis}"),
            Skipped::InvalidQuantity(item) => {
                format!("{item}: quantity must be a positive number up to {MAX_QUANTITY}")
            }
        }
    }
}

/// Prices `value` of `item`, where `unit` is what the user wrote (if any).
///
/// With a unit of the same dimension as the catalog basis the amount is
/// `price × requested / basis`. Without a unit, count-based items take the
/// number as pieces and everything else as multiples of the catalog pack.
/// Packs, packets and bags are always multiples of the catalog pack.
pub fn price_line(item: &GroceryItem, value: f64, unit: Option<Unit>) -> Result<BillLine, Skipped> {
    if !value.is_finite() || value <= 0.0 || value > MAX_QUANTITY {
        return Err(Skipped::InvalidQuantity(item.name.clone()));
    }

    let basis = item.basis();
    let measured = match (unit, basis) {
        (Some(Unit::Packet), b) if b.map(|q| q.dimension()) != Some(Dimension::Pack) => None,
        (Some(unit), Some(basis)) if unit.dimension() == basis.dimension() => {
            Some((Quantity::new(value, unit), basis))
        }
        (Some(unit), Some(_)) => {
            return Err(Skipped::UnitMismatch {
                item: item.name.clone(),
                requested: Quantity::new(value, unit).to_string(),
                basis: item.unit.clone(),
            })
        }
        (Some(unit), None) if unit.dimension() != Dimension::Count => {
            return Err(Skipped::UnitMismatch {
                item: item.name.clone(),
                requested: Quantity::new(value, unit).to_string(),
                basis: if item.unit.is_empty() {
                    "unit".to_string()
                } else {
                    item.unit.clone()
                },
            })
        }
        (None, Some(basis)) if basis.dimension() == Dimension::Count => {
            Some((Quantity::new(value, Unit::Piece), basis))
        }
        _ => None,
    };

    let currency = item.currency.as_str();
    let price = item.price.display(currency);
    let line = match measured {
        Some((requested, basis)) => {
            let factor = requested.base() / basis.base();
            let amount = item.price.scale(factor);
            BillLine {
                item: item.clone(),
                requested: Requested::Measured(requested),
                amount,
                calculation: format!(
                    "{}: {requested} ÷ {basis} = {} × {price} = {}",
                    item.name,
                    format_number(factor),
                    amount.display(currency)
                ),
            }
        }
        None => {
            let amount = item.price.scale(value);
            BillLine {
                item: item.clone(),
                requested: Requested::Multiple(value),
                amount,
                calculation: format!(
                    "{}: {} × {price} = {}",
                    item.name,
                    format_number(value),
                    amount.display(currency)
                ),
            }
        }
    };
    Ok(line)
}

/// Prices one extracted entry against its catalog item. A missing quantity
/// means one; a blank unit means none was given.
pub fn price_requested(item: &GroceryItem, entry: &RequestedItem) -> Result<BillLine, Skipped> {
    let value = match &entry.quantity {
        None => 1.0,
        Some(amount) => amount
            .value()
            .ok_or_else(|| Skipped::InvalidQuantity(item.name.clone()))?,
    };
    let unit_text = entry.unit.as_deref().map(str::trim).unwrap_or_default();
    let unit = if unit_text.is_empty() {
        None
    } else {
        Some(Unit::parse(unit_text).ok_or_else(|| Skipped::UnknownUnit {
            item: item.name.clone(),
            unit: unit_text.to_string(),
        })?)
    };
    price_line(item, value, unit)
}

/// Chooses the total to show when the model also declared one.
///
/// The computed total always wins. A declared total that differs by more
/// than one minor unit is logged and returned so the answer can mention the
/// correction.
pub fn reconcile_total(computed: Money, declared: Option<Money>) -> Option<Money> {
    let declared = declared?;
    if declared.minor().abs_diff(computed.minor()) > 1 {
        warn!(
            declared = declared.minor(),
            computed = computed.minor(),
            "Declared total differs from computed sum, using computed"
        );
        Some(declared)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bill {
    pub lines: Vec<BillLine>,
    pub skipped: Vec<Skipped>,
    pub total: Money,
    pub currency: String,
    /// The declared total that was replaced, if any.
    pub corrected_from: Option<Money>,
}

impl Bill {
    /// Prices every entry found in `catalog`. `default_currency` is used
    /// when nothing could be priced.
    pub fn price(
        catalog: &Catalog,
        requested: &[RequestedItem],
        declared_total: Option<f64>,
        default_currency: &str,
    ) -> Bill {
        let mut lines = Vec::new();
        let mut skipped = Vec::new();

        for entry in requested {
            let result = match catalog.find(&entry.name) {
                Some(item) => price_requested(item, entry),
                None => Err(Skipped::NotInCatalog(entry.name.trim().to_string())),
            };
            match result {
                Ok(line) => lines.push(line),
                Err(skip) => skipped.push(skip),
            }
        }

        let total: Money = lines.iter().map(|l| l.amount).sum();
        let currency = lines
            .first()
            .map(|l| l.item.currency.clone())
            .unwrap_or_else(|| catalog.currency(default_currency).to_string());
        let declared = declared_total.and_then(Money::checked_from_major);
        if declared.is_none() && declared_total.is_some() {
            debug!(declared_total = ?declared_total, "Ignoring unusable declared total");
        }
        let corrected_from = reconcile_total(total, declared);
        debug!(
            lines = lines.len(),
            skipped = skipped.len(),
            total = total.minor(),
            "Priced shopping list"
        );

        Bill {
            lines,
            skipped,
            total,
            currency,
            corrected_from,
        }
    }

    /// Markdown breakdown table, numbered calculation steps and the total.
    pub fn render(&self) -> String {
        let currency = self.currency.as_str();
        let mut out = String::new();

        if self.lines.is_empty() {
            out.push_str(messages::NOTHING_PRICED);
            out.push('\n');
        } else {
            out.push_str("| Item | Unit Price | Quantity | Amount |\n");
            out.push_str("|------|------------|----------|--------|\n");
            for line in &self.lines {
                out.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    line.item.name,
                    line.item.price_label(),
                    line.quantity_label(),
                    line.amount.display(&line.item.currency)
                ));
            }
            out.push('\n');
            out.push_str(messages::CALCULATION_HEADER);
            out.push('\n');
            for (idx, line) in self.lines.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", idx + 1, line.calculation));
            }
        }

        if !self.skipped.is_empty() {
            out.push('\n');
            out.push_str(messages::NOT_PRICED_HEADER);
            out.push('\n');
            for skip in &self.skipped {
                out.push_str(&format!("- {}\n", skip.describe()));
            }
        }

        if let Some(declared) = self.corrected_from {
            out.push('\n');
            out.push_str(&messages::corrected_total(
                &declared.display(currency),
                &self.total.display(currency),
            ));
            out.push('\n');
        }

        out.push_str(&format!("\n**Total: {}**", self.total.display(currency)));
        out
    }
}
