use std::sync::Mutex;

use async_trait::async_trait;

use crate::ai::{CompletionRequest, ReasoningClient};
use crate::catalog::{Catalog, GroceryItem};
use crate::db::{connect_db, Database};
use crate::error::AiError;
use crate::units::Money;

/// The twenty-item INR catalog the assistant ships with for demos.
pub const SAMPLE_ITEMS: [(&str, f64, &str, &str); 20] = [
    ("Milk", 65.00, "Dairy", "1 liter"),
    ("Bread", 40.00, "Bakery", "1 packet"),
    ("Eggs", 80.00, "Dairy", "12 count"),
    ("Apples", 180.00, "Produce", "1 kg"),
    ("Bananas", 60.00, "Produce", "1 dozen"),
    ("Chicken Breast", 320.00, "Meat", "1 kg"),
    ("Rice", 75.00, "Grains", "1 kg bag"),
    ("Atta (Wheat Flour)", 60.00, "Grains", "1 kg"),
    ("Tomatoes", 40.00, "Produce", "1 kg"),
    ("Potatoes", 30.00, "Produce", "1 kg"),
    ("Onions", 25.00, "Produce", "1 kg"),
    ("Paneer", 80.00, "Dairy", "200 gm"),
    ("Curd", 45.00, "Dairy", "500 gm"),
    ("Tea", 120.00, "Beverages", "250 gm"),
    ("Sugar", 45.00, "Essentials", "1 kg"),
    ("Cooking Oil", 180.00, "Essentials", "1 liter"),
    ("Dal (Lentils)", 110.00, "Pulses", "1 kg"),
    ("Biscuits", 30.00, "Snacks", "1 packet"),
    ("Salt", 20.00, "Essentials", "1 kg"),
    ("Green Chillies", 15.00, "Produce", "100 gm"),
];

pub fn sample_catalog() -> Catalog {
    Catalog::new(
        SAMPLE_ITEMS
            .iter()
            .map(|&(name, price, category, unit)| {
                GroceryItem::new(name, Money::from_major(price), category, unit, "INR")
            })
            .collect(),
    )
}

/// In-memory database with an empty `grocery_items` table.
pub async fn init_test_db() -> Database {
    let pool = connect_db("sqlite::memory:", 1)
        .await
        .expect("failed to create in-memory database");

    sqlx::query(
        "CREATE TABLE grocery_items(\n    id INTEGER PRIMARY KEY AUTOINCREMENT,\n    name VARCHAR(100) NOT NULL,\n    price DECIMAL(10, 2) NOT NULL,\n    category VARCHAR(50),\n    unit VARCHAR(20),\n    currency VARCHAR(3) DEFAULT 'INR'\n)"
    )
    .execute(&pool)
    .await
    .unwrap();

    Database::new(pool)
}

pub async fn insert_item(db: &Database, name: &str, price: f64, category: &str, unit: &str) {
    sqlx::query("INSERT INTO grocery_items (name, price, category, unit) VALUES (?, ?, ?, ?)")
        .bind(name)
        .bind(price)
        .bind(category)
        .bind(unit)
        .execute(db.pool())
        .await
        .unwrap();
}

pub async fn seed_sample_catalog(db: &Database) {
    for (name, price, category, unit) in SAMPLE_ITEMS {
        insert_item(db, name, price, category, unit).await;
    }
}

/// A [`ReasoningClient`] that answers from a fixed script.
///
/// Each rule pairs a marker with a reply; the first rule whose marker appears
/// in the system prompt answers. Replies do not depend on call order, so the
/// same question always gets the same answer.
#[derive(Default)]
pub struct ScriptedClient {
    rules: Vec<(String, Result<String, String>)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, marker: &str, reply: &str) -> Self {
        self.rules.push((marker.to_string(), Ok(reply.to_string())));
        self
    }

    pub fn fail(mut self, marker: &str, error: &str) -> Self {
        self.rules.push((marker.to_string(), Err(error.to_string())));
        self
    }

    /// Markers of the rules that answered, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ReasoningClient for ScriptedClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, AiError> {
        let Some((marker, reply)) = self
            .rules
            .iter()
            .find(|(marker, _)| request.system.contains(marker.as_str()))
        else {
            return Err(AiError::Malformed("no scripted reply".into()));
        };
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(marker.clone());
        }
        reply.clone().map_err(AiError::Malformed)
    }
}
