// Database related types and functions

use anyhow::Result;
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};

pub mod database;
pub mod grocery_items;

pub use database::Database;
pub use grocery_items::{fetch_grocery_rows, GroceryRow};

pub fn prepare_sqlite_url(url: &str) -> String {
    if url.starts_with("sqlite:") && !url.contains("mode=") && !url.contains(":memory:") {
        if url.contains('?') {
            format!("{url}&mode=rwc")
        } else {
            format!("{url}?mode=rwc")
        }
    } else {
        url.to_string()
    }
}

pub async fn connect_db(db_url: &str, max_connections: u32) -> Result<Pool<Sqlite>> {
    tracing::debug!(db_url = %db_url, max_connections, "Connecting to database");
    Ok(SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(db_url)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_sqlite_url_basic() {
        assert_eq!(
            prepare_sqlite_url("sqlite:grocery.db"),
            "sqlite:grocery.db?mode=rwc"
        );
    }

    #[test]
    fn prepare_sqlite_url_with_query() {
        assert_eq!(
            prepare_sqlite_url("sqlite:grocery.db?cache=shared"),
            "sqlite:grocery.db?cache=shared&mode=rwc"
        );
    }

    #[test]
    fn prepare_sqlite_url_existing_mode() {
        assert_eq!(
            prepare_sqlite_url("sqlite:grocery.db?mode=ro"),
            "sqlite:grocery.db?mode=ro"
        );
    }

    #[test]
    fn prepare_sqlite_url_memory() {
        assert_eq!(prepare_sqlite_url("sqlite::memory:"), "sqlite::memory:");
    }
}
