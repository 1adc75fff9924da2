use std::sync::OnceLock;

use regex::Regex;
use tracing::trace;

fn think_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<think>.*?</think>").expect("valid think regex"))
}

fn blank_lines_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").expect("valid blank line regex"))
}

/// Remove `<think>…</think>` reasoning blocks and collapse the blank lines
/// they leave behind.
pub fn clean_response(text: &str) -> String {
    let without_think = think_regex().replace_all(text, "");
    let cleaned = blank_lines_regex().replace_all(&without_think, "\n\n");
    let cleaned = cleaned.trim().to_string();
    trace!(before = text.len(), after = cleaned.len(), "Cleaned model reply");
    cleaned
}
