use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::ai::ReasoningClient;
use crate::dispatcher::Dispatcher;
use crate::messages;
use crate::system_info::get_system_info;
use crate::units::currency_symbol;

#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Exit,
    Blank,
    Info,
    Question(&'a str),
}

pub fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    let lowered = trimmed.to_lowercase();
    if trimmed.is_empty() {
        Input::Blank
    } else if messages::EXIT_WORDS.contains(&lowered.as_str()) {
        Input::Exit
    } else if lowered == messages::INFO_COMMAND {
        Input::Info
    } else {
        Input::Question(trimmed)
    }
}

/// Reads questions line by line and writes one answer per question until
/// an exit word or end of input.
pub async fn interactive<C, R, W>(
    dispatcher: &Dispatcher<C>,
    currency: &str,
    input: R,
    out: &mut W,
) -> Result<()>
where
    C: ReasoningClient,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let symbol = currency_symbol(currency);
    out.write_all(messages::welcome_text(currency, symbol.trim_end()).as_bytes())
        .await?;
    out.write_all(b"\n").await?;

    let mut lines = input.lines();
    loop {
        out.write_all(messages::QUESTION_PROMPT.as_bytes()).await?;
        out.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse_input(&line) {
            Input::Blank => continue,
            Input::Exit => {
                out.write_all(messages::GOODBYE.as_bytes()).await?;
                out.write_all(b"\n").await?;
                break;
            }
            Input::Info => {
                let catalog = dispatcher.catalog();
                let summary =
                    messages::catalog_summary(catalog.len(), catalog.categories().len());
                out.write_all(format!("{}\n{summary}\n", get_system_info()).as_bytes())
                    .await?;
            }
            Input::Question(question) => {
                tracing::debug!(question, "Received question");
                let answer = dispatcher.answer(question).await;
                out.write_all(format!("{}{answer}\n", messages::ANSWER_PREFIX).as_bytes())
                    .await?;
            }
        }
    }
    out.flush().await?;
    Ok(())
}
