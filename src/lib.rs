use std::env;

use anyhow::Result;
use tokio::io::BufReader;

pub mod ai;
pub mod bill;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod db;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod messages;
pub mod receipt;
pub mod session;
mod system_info;
pub mod text_utils;
pub mod units;

pub use ai::{ChatClient, ReasoningClient};
pub use catalog::{Catalog, CatalogLoad, GroceryItem};
pub use classifier::{classify, Classification, Intent};
pub use config::Config;
pub use dispatcher::Dispatcher;
pub use error::{AiError, AssistantError, HandlerError};
pub use system_info::{get_system_info, BuildInfo};
pub use text_utils::clean_response;
pub use units::Money;

async fn load_catalog(config: &Config) -> CatalogLoad {
    let db_url = db::prepare_sqlite_url(&config.db_url);
    tracing::info!("Connecting to database at: {}", &db_url);
    match db::connect_db(&db_url, 5).await {
        Ok(pool) => catalog::load(&db::Database::new(pool), &config.currency).await,
        Err(err) => {
            tracing::warn!(error = %err, "Database unreachable");
            CatalogLoad {
                catalog: Catalog::default(),
                unavailable: Some(AssistantError::DataUnavailable {
                    reason: err.to_string(),
                }),
            }
        }
    }
}

// ──────────────────────────────────────────────────────────────
// Main application setup
// ──────────────────────────────────────────────────────────────

pub async fn run() -> Result<()> {
    let config = Config::from_env();

    // Logs go to stderr so answers on stdout stay clean.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting grocery price assistant...");
    tracing::info!(model = %config.ai.model, url = %config.ai.chat_url, "Using model");

    let loaded = load_catalog(&config).await;
    if let Some(err) = &loaded.unavailable {
        tracing::warn!(error = %err, "Continuing with an empty catalog");
        eprintln!("{}", messages::CATALOG_UNAVAILABLE);
    }

    let client = ChatClient::new(config.ai.clone())?;
    let dispatcher = Dispatcher::new(client, loaded.catalog).with_currency(&config.currency);

    // Words on the command line form a single question answered as a receipt.
    let question = env::args().skip(1).collect::<Vec<_>>().join(" ");
    if !question.trim().is_empty() {
        let answer = dispatcher.answer(&question).await;
        let issued_at = chrono::Local::now().naive_local();
        let receipt = receipt::build_receipt(&answer, issued_at);
        println!("{receipt}");
        let path = receipt::save_receipt(&env::current_dir()?, &receipt, issued_at).await?;
        println!("{}", messages::receipt_saved(&path.display().to_string()));
        return Ok(());
    }

    let mut stdout = tokio::io::stdout();
    session::interactive(
        &dispatcher,
        &config.currency,
        BufReader::new(tokio::io::stdin()),
        &mut stdout,
    )
    .await
}
