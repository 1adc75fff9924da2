//! Markdown receipts for single-question runs. Rendering to an image is left
//! to external tools.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDateTime;

use crate::messages::{RECEIPT_FOOTER, STORE_NAME};
use crate::text_utils::clean_response;

pub fn receipt_number(issued_at: NaiveDateTime) -> String {
    issued_at.format("%Y%m%d%H%M%S").to_string()
}

/// Wraps an answer in the store header and footer.
pub fn build_receipt(answer: &str, issued_at: NaiveDateTime) -> String {
    format!(
        "# {STORE_NAME} - Receipt #{}\n\n**Date:** {}\n\n{}\n\n---\n\n{RECEIPT_FOOTER}\n",
        receipt_number(issued_at),
        issued_at.format("%Y-%m-%d %H:%M:%S"),
        clean_response(answer)
    )
}

/// Writes `receipt_<number>.md` into `dir` and returns its path.
pub async fn save_receipt(dir: &Path, receipt: &str, issued_at: NaiveDateTime) -> Result<PathBuf> {
    let path = dir.join(format!("receipt_{}.md", receipt_number(issued_at)));
    tokio::fs::write(&path, receipt).await?;
    tracing::info!(path = %path.display(), "Saved receipt");
    Ok(path)
}
