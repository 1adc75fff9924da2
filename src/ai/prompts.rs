//! System prompts sent to the reasoning model.
//!
//! Each prompt opens with a role line. The catalog is embedded as JSON so the
//! model only ever sees real items and prices. Specialized prompts ask for
//! structured fields; the arithmetic happens in [`crate::bill`].

pub const CLASSIFIER_ROLE: &str =
    "Your task is to classify the user's grocery-related query into one of these types:";
pub const PRICE_ROLE: &str = "You are a grocery price lookup assistant.";
pub const SHOPPING_ROLE: &str = "You are a precise grocery shopping list reader.";
pub const CATEGORY_ROLE: &str = "You are a grocery category lookup assistant.";
pub const COMPARISON_ROLE: &str = "You are a grocery price comparison assistant.";
pub const FALLBACK_ROLE: &str = "You are a grocery shopping assistant who helps calculate prices based on a grocery items database.";

const GROUNDING: &str = "Only use items that appear in the catalog. Do NOT invent items or prices.";

pub fn classifier_prompt() -> String {
    format!(
        "{CLASSIFIER_ROLE}
- price_query: User wants to know the price of specific items
- shopping_list: User wants to calculate the total cost of multiple items with quantities
- category_query: User wants to see all items in a specific category
- comparison_query: User wants to compare prices between items
- unknown: Query doesn't fit any of the above categories

Respond with a JSON object like {{\"type\": \"price_query\", \"explanation\": \"why this type was selected\"}}."
    )
}

pub fn price_prompt(catalog_json: &str) -> String {
    format!(
        "{PRICE_ROLE} The user wants to know the price of specific items.

Here is the complete list of grocery items with their prices and units:
{catalog_json}

Identify every item whose price the user asks about. Use the catalog name when an item matches, otherwise repeat the user's wording.
Only when the user explicitly asks for a specific amount (for example \"500 g of paneer\"), give that quantity as a number and the unit as written; otherwise use null for both.
{GROUNDING}
Respond with a JSON object like {{\"items\": [{{\"name\": \"Milk\", \"quantity\": null, \"unit\": null}}, {{\"name\": \"Paneer\", \"quantity\": 500, \"unit\": \"g\"}}]}}."
    )
}

pub fn shopping_prompt(catalog_json: &str) -> String {
    format!(
        "{SHOPPING_ROLE} Extract the items and quantities from the user's shopping list.

Here is the complete list of grocery items with their prices and units:
{catalog_json}

For each item mentioned:
1. Use the catalog name when an item matches, otherwise repeat the user's wording
2. Give the quantity as a number (convert number words to digits)
3. Give the unit exactly as the user wrote it (kg, g, liter, ml, packet, dozen, piece) or an empty string when no unit was given
4. Put your own estimate of the total cost in \"total\", or null

{GROUNDING}
Respond with a JSON object like {{\"items\": [{{\"name\": \"Rice\", \"quantity\": 2, \"unit\": \"kg\"}}], \"total\": 150.0}}."
    )
}

pub fn category_prompt(catalog_json: &str, categories: &[&str]) -> String {
    format!(
        "{CATEGORY_ROLE} The user wants to see items in a specific category.

Here is the complete list of grocery items with their prices and units:
{catalog_json}

Available categories: {}

Identify which category the user is asking about. Use the catalog spelling when it matches one of the available categories, otherwise repeat the user's wording.
Respond with a JSON object like {{\"category\": \"Dairy\"}}.",
        categories.join(", ")
    )
}

pub fn comparison_prompt(catalog_json: &str) -> String {
    format!(
        "{COMPARISON_ROLE} The user wants to compare prices between items.

Here is the complete list of grocery items with their prices and units:
{catalog_json}

Identify the items being compared. Use the catalog name when an item matches, otherwise repeat the user's wording.
{GROUNDING}
Respond with a JSON object like {{\"items\": [\"Apples\", \"Tomatoes\"]}}."
    )
}

/// The general-purpose prompt used whenever a specialized path is not taken
/// or fails. It covers all query kinds and answers in free text.
pub fn fallback_prompt(catalog_json: &str, symbol: &str) -> String {
    format!(
        "{FALLBACK_ROLE}

Here is the complete list of grocery items with their prices and units:
{catalog_json}

First, identify which grocery items from the database are relevant to the query, and then:

1. For price queries:
   - Look up the price of each item from the database
   - State the price per unit clearly: e.g., \"Milk costs {symbol}65 per liter\"

2. For shopping list queries (user wants to buy items with quantities):
   - Create a formatted table with columns: Item | Unit Price | Quantity | Amount
   - For each item, calculate the exact cost based on the requested quantity
   - For weight conversions: 1 kg = 1000 g
   - For volume conversions: 1 liter = 1000 ml
   - Show calculation steps: e.g., \"Rice: {symbol}75/kg × 0.75kg = {symbol}56.25\"
   - Sum up the total at the end
   - DOUBLE-CHECK YOUR MATH: Verify that all calculations are correct

3. For category queries:
   - List all items in the specified category with their prices
   - Format each item as: \"[Item]: {symbol}[price] per [unit]\"

4. For comparison queries:
   - Convert to the same unit before comparing (if needed)
   - Clearly state which item is cheaper/more expensive

IMPORTANT: Only use the exact prices and units from the provided grocery items data.
Do NOT invent or assume any information not present in the database."
    )
}
