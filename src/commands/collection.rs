use anyhow::{bail, Result};
use colored::Colorize;

use super::{request::run_and_record, CommandStatus};
use crate::collection::CollectionError;
use crate::config::DataDir;
use crate::executor::truncate_chars;

const URL_COLUMN_WIDTH: usize = 50;

pub fn save(data: &DataDir, name: &str) -> Result<CommandStatus> {
    data.collections.save_last(name, &data.history)?;
    println!(
        "{}",
        format!("✓ Saved last request to collection '{name}'").green()
    );
    Ok(CommandStatus::Success)
}

/// Executes a saved collection as stored and records it in history.
pub async fn load(
    data: &DataDir,
    name: &str,
    timeout_secs: u64,
    verbose: bool,
) -> Result<CommandStatus> {
    let Some(collection) = data.collections.load(name)? else {
        return Err(CollectionError::NotFound(name.to_string()).into());
    };

    println!("{}", format!("Loading collection '{name}'").cyan());
    run_and_record(data, &collection.to_request(timeout_secs), verbose).await
}

pub fn list(data: &DataDir) -> Result<CommandStatus> {
    let collections = data.collections.list()?;
    if collections.is_empty() {
        println!("{}", "No collections saved".yellow());
        return Ok(CommandStatus::Success);
    }

    println!("\n{}\n", "Saved Collections".bold());
    for summary in &collections {
        let (url, _) = truncate_chars(&summary.url, URL_COLUMN_WIDTH);
        println!(
            "  {} - {} {}",
            summary.name.cyan(),
            summary.method.bold(),
            url
        );
    }
    Ok(CommandStatus::Success)
}

pub fn delete(data: &DataDir, name: &str) -> Result<CommandStatus> {
    if !data.collections.delete(name)? {
        bail!(CollectionError::NotFound(name.to_string()));
    }
    println!("{}", format!("✓ Deleted collection '{name}'").green());
    Ok(CommandStatus::Success)
}
