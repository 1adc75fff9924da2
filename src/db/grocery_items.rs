use anyhow::Result;

use super::Database;

/// One row of the `grocery_items` table. Category, unit and currency are
/// nullable in the schema.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct GroceryRow {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub currency: Option<String>,
}

/// Reads the whole table in id order.
pub async fn fetch_grocery_rows(db: &Database) -> Result<Vec<GroceryRow>> {
    tracing::trace!("Fetching grocery items");
    // DECIMAL columns may come back as INTEGER under SQLite affinity rules.
    let rows = sqlx::query_as::<_, GroceryRow>(
        "SELECT id, name, CAST(price AS REAL) AS price, category, unit, currency
         FROM grocery_items ORDER BY id",
    )
    .fetch_all(db.pool())
    .await?;
    tracing::debug!(count = rows.len(), "Fetched grocery items");
    Ok(rows)
}
