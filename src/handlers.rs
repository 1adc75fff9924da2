//! One handler per intent plus the general-purpose fallback.

pub mod category;
pub mod comparison;
pub mod fallback;
pub mod price;
pub mod shopping;

use crate::ai::ReasoningClient;
use crate::catalog::Catalog;
use crate::classifier::Intent;
use crate::error::HandlerError;

pub use category::answer_category_query;
pub use comparison::{answer_comparison_query, compare, Comparison};
pub use fallback::answer_fallback;
pub use price::answer_price_query;
pub use shopping::answer_shopping_list;

/// What every handler is given: the model and the catalog snapshot.
pub struct HandlerContext<'a, C: ?Sized> {
    pub client: &'a C,
    pub catalog: &'a Catalog,
    /// The catalog rendered once as prompt JSON.
    pub catalog_json: &'a str,
    /// Configured currency, used when the catalog does not name one.
    pub currency: &'a str,
}

/// Runs the specialized handler for `intent`.
pub async fn handle<C>(
    intent: Intent,
    ctx: &HandlerContext<'_, C>,
    question: &str,
) -> Result<String, HandlerError>
where
    C: ReasoningClient + ?Sized,
{
    match intent {
        Intent::PriceQuery => answer_price_query(ctx, question).await,
        Intent::ShoppingList => answer_shopping_list(ctx, question).await,
        Intent::CategoryQuery => answer_category_query(ctx, question).await,
        Intent::ComparisonQuery => answer_comparison_query(ctx, question).await,
        Intent::Unknown => Err(HandlerError::Unusable(
            "no specialized handler for unknown questions".into(),
        )),
    }
}
