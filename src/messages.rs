//! Shared text shown to the user.
//!
//! Keep all user-facing strings in this module so they stay in one place and are
//! easy to update or translate.

pub const EXIT_WORDS: [&str; 3] = ["exit", "quit", "bye"];
pub const INFO_COMMAND: &str = "info";

pub fn welcome_text(currency: &str, symbol: &str) -> String {
    format!(
        "Welcome to the Grocery Price Assistant!\n\
         All prices are listed in {currency} ({symbol})\n\
         Ask me about the prices of grocery items, or type 'exit' to quit.\n\
         Example: 'I want to buy 2L milk, 1kg tomatoes, and 3 packets of bread'"
    )
}

pub const QUESTION_PROMPT: &str = "\nYour question: ";
pub const ANSWER_PREFIX: &str = "\nAssistant: ";
pub fn catalog_summary(items: usize, categories: usize) -> String {
    format!("Catalog: {items} items in {categories} categories")
}

pub const GOODBYE: &str = "Thank you for using the Grocery Price Assistant. Goodbye!";

pub const CATALOG_UNAVAILABLE: &str =
    "Warning: the grocery catalog could not be loaded, so no items will be found.";
pub const EMPTY_QUESTION: &str = "Please ask a question about grocery prices.";

pub fn unrecoverable_answer(reason: &str) -> String {
    format!("Sorry, I couldn't answer that right now ({reason}). Please try again.")
}

pub fn price_line(name: &str, label: &str) -> String {
    format!("{name} costs {label}")
}

pub fn priced_amount(price_line: &str, quantity: &str, amount: &str) -> String {
    format!("{price_line}, so {quantity} costs {amount}")
}

pub fn not_in_catalog(name: &str) -> String {
    format!("Sorry, \"{name}\" is not in the catalog.")
}

pub fn category_header(category: &str) -> String {
    format!("{category} items:")
}

pub fn unknown_category(requested: &str, available: &[&str]) -> String {
    let lead = if requested.trim().is_empty() {
        "I couldn't tell which category you meant.".to_string()
    } else {
        format!("There is no \"{}\" category.", requested.trim())
    };
    if available.is_empty() {
        format!("{lead} The catalog has no categories right now.")
    } else {
        format!("{lead} Available categories: {}", available.join(", "))
    }
}

pub const NOTHING_PRICED: &str = "None of the requested items could be priced.";
pub const NOT_PRICED_HEADER: &str = "Not priced:";
pub const CALCULATION_HEADER: &str = "**Calculation:**";

pub fn corrected_total(declared: &str, computed: &str) -> String {
    format!("Note: the estimated total {declared} was corrected to the computed sum {computed}.")
}

pub fn cannot_compare_units(labels: &[String]) -> String {
    format!(
        "These items are sold in different kinds of units, so they cannot be compared on a common unit:\n{}",
        labels
            .iter()
            .map(|l| format!("- {l}"))
            .collect::<Vec<_>>()
            .join("\n")
    )
}

pub const STORE_NAME: &str = "GroceryMart";
pub const RECEIPT_FOOTER: &str =
    "Thank you for shopping with us!\n*Prices include all applicable taxes*";
pub fn receipt_saved(path: &str) -> String {
    format!("Receipt content saved as: {path}")
}
