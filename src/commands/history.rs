use anyhow::Result;
use colored::Colorize;

use super::{request::run_and_record, CommandStatus};
use crate::config::DataDir;
use crate::executor::{format_duration, status_color, truncate_chars};
use crate::history::HistoryEntry;

const URL_COLUMN_WIDTH: usize = 60;

/// Lists entries most recent first, numbered the way `replay` expects.
pub fn show_history(data: &DataDir, limit: Option<usize>) -> Result<CommandStatus> {
    let entries = data.history.list(limit)?;
    if entries.is_empty() {
        println!("{}", "No requests in history".yellow());
        return Ok(CommandStatus::Success);
    }

    println!(
        "\n{}\n",
        format!("Request History ({} entries)", entries.len()).bold()
    );
    for (index, entry) in entries.iter().rev().enumerate() {
        println!("{}", render_history_line(index + 1, entry));
    }
    println!(
        "\n{}",
        "Use 'restcli replay <number>' to replay a request".dimmed()
    );
    Ok(CommandStatus::Success)
}

/// Re-sends the `n`th most recent entry exactly as recorded and records the
/// replay as a new entry.
pub async fn replay(
    data: &DataDir,
    n: usize,
    timeout_secs: u64,
    verbose: bool,
) -> Result<CommandStatus> {
    let entry = data.history.get_by_recency(n)?;
    println!(
        "{}",
        format!("Replaying request from {}", entry.timestamp).cyan()
    );
    run_and_record(data, &entry.to_request(timeout_secs), verbose).await
}

pub fn render_history_line(number: usize, entry: &HistoryEntry) -> String {
    let timestamp = entry
        .recorded_at()
        .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| entry.timestamp.clone());
    let status = match entry.response.status {
        Some(status) => status.to_string().color(status_color(status)),
        None => "ERR".dimmed(),
    };
    let (url, _) = truncate_chars(&entry.url, URL_COLUMN_WIDTH);

    format!(
        "{} {} | {} | {} | {} | {}",
        format!("{number:3}.").dimmed(),
        timestamp.cyan(),
        format!("{:6}", entry.method.as_str()).bold(),
        status,
        format_duration(entry.response.duration_secs).dimmed(),
        url
    )
}
