//! Money and measurement units used by the pricing core.
//!
//! All arithmetic on prices happens here and in [`crate::bill`], never in the
//! model. Prices are kept in integer minor units so totals add up exactly.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::sync::OnceLock;

use regex::Regex;

/// Largest amount, in major units, accepted from outside the catalog.
pub const MAX_MAJOR: f64 = 1e12;

/// An amount of money in minor units (paise for INR). Arithmetic saturates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(pub i64);

impl Money {
    /// Builds an amount from a decimal major-unit value, rounding to the
    /// nearest minor unit.
    pub fn from_major(value: f64) -> Self {
        Money::saturating_from_minor(value * 100.0)
    }

    /// Like [`Money::from_major`], but `None` for values that are not finite
    /// or beyond [`MAX_MAJOR`] in magnitude.
    pub fn checked_from_major(value: f64) -> Option<Self> {
        (value.is_finite() && value.abs() <= MAX_MAJOR).then(|| Money::from_major(value))
    }

    fn saturating_from_minor(minor: f64) -> Self {
        // `as` saturates at the i64 bounds and maps NaN to zero.
        Money(minor.round() as i64)
    }

    pub fn minor(self) -> i64 {
        self.0
    }

    pub fn as_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Multiplies by a quantity factor, rounding half away from zero.
    pub fn scale(self, factor: f64) -> Self {
        Money::saturating_from_minor(self.0 as f64 * factor)
    }

    /// Renders the amount with the symbol for `currency`, e.g. `₹37.50`.
    pub fn display(self, currency: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!(
            "{sign}{}{}.{:02}",
            currency_symbol(currency),
            abs / 100,
            abs % 100
        )
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::default(), Add::add)
    }
}

pub fn currency_symbol(code: &str) -> String {
    match code.trim().to_ascii_uppercase().as_str() {
        "INR" => "₹".to_string(),
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        other => format!("{other} "),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Mass,
    Volume,
    Count,
    /// Whole catalog packs, whatever they contain.
    Pack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Gram,
    Kilogram,
    Milliliter,
    Liter,
    Piece,
    Dozen,
    Packet,
}

pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;
pub const MILLILITERS_PER_LITER: f64 = 1000.0;
pub const PIECES_PER_DOZEN: f64 = 12.0;

impl Unit {
    /// Recognizes the usual spellings of a unit word. Case and a trailing
    /// period are ignored.
    pub fn parse(word: &str) -> Option<Unit> {
        let word = word.trim().trim_end_matches('.').to_lowercase();
        let unit = match word.as_str() {
            "g" | "gm" | "gms" | "gr" | "gram" | "grams" | "gramme" | "grammes" => Unit::Gram,
            "kg" | "kgs" | "kilo" | "kilos" | "kilogram" | "kilograms" => Unit::Kilogram,
            "ml" | "mls" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                Unit::Milliliter
            }
            "l" | "lt" | "ltr" | "ltrs" | "liter" | "liters" | "litre" | "litres" => Unit::Liter,
            "pc" | "pcs" | "piece" | "pieces" | "count" | "unit" | "units" | "nos" => Unit::Piece,
            "dozen" | "dozens" | "dz" => Unit::Dozen,
            "packet" | "packets" | "pack" | "packs" | "pkt" | "pkts" | "bag" | "bags" => {
                Unit::Packet
            }
            _ => return None,
        };
        Some(unit)
    }

    pub fn dimension(self) -> Dimension {
        match self {
            Unit::Gram | Unit::Kilogram => Dimension::Mass,
            Unit::Milliliter | Unit::Liter => Dimension::Volume,
            Unit::Piece | Unit::Dozen => Dimension::Count,
            Unit::Packet => Dimension::Pack,
        }
    }

    /// How many grams, milliliters or pieces one of this unit holds.
    pub fn base_factor(self) -> f64 {
        match self {
            Unit::Gram | Unit::Milliliter | Unit::Piece | Unit::Packet => 1.0,
            Unit::Kilogram => GRAMS_PER_KILOGRAM,
            Unit::Liter => MILLILITERS_PER_LITER,
            Unit::Dozen => PIECES_PER_DOZEN,
        }
    }

    pub fn symbol(self, plural: bool) -> &'static str {
        match (self, plural) {
            (Unit::Gram, _) => "g",
            (Unit::Kilogram, _) => "kg",
            (Unit::Milliliter, _) => "ml",
            (Unit::Liter, _) => "L",
            (Unit::Piece, false) => "pc",
            (Unit::Piece, true) => "pcs",
            (Unit::Dozen, _) => "dozen",
            (Unit::Packet, false) => "packet",
            (Unit::Packet, true) => "packets",
        }
    }
}

impl Dimension {
    /// The unit prices are normalized to when items are compared.
    pub fn comparison_unit(self) -> Unit {
        match self {
            Dimension::Mass => Unit::Kilogram,
            Dimension::Volume => Unit::Liter,
            Dimension::Count => Unit::Piece,
            Dimension::Pack => Unit::Packet,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

fn basis_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(?:(\d+(?:\.\d+)?)\s*)?([A-Za-z]+)").expect("valid unit regex")
    })
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Amount expressed in grams, milliliters or pieces.
    pub fn base(&self) -> f64 {
        self.value * self.unit.base_factor()
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// Reads catalog unit text such as `"1 kg bag"`, `"200 gm"` or
    /// `"dozen"`. The leading number defaults to one and trailing words are
    /// ignored.
    pub fn parse_basis(text: &str) -> Option<Quantity> {
        let caps = basis_regex().captures(text)?;
        let value = match caps.get(1) {
            Some(m) => m.as_str().parse::<f64>().ok()?,
            None => 1.0,
        };
        let unit = Unit::parse(caps.get(2)?.as_str())?;
        if value <= 0.0 {
            return None;
        }
        Some(Quantity::new(value, unit))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = (self.value - 1.0).abs() > f64::EPSILON;
        write!(
            f,
            "{} {}",
            format_number(self.value),
            self.unit.symbol(plural)
        )
    }
}

/// Formats a quantity with up to three decimals and no trailing zeros.
pub fn format_number(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        return format!("{}", value.round() as i64);
    }
    let text = format!("{value:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
