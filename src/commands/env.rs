use anyhow::{bail, Result};
use colored::Colorize;

use super::CommandStatus;
use crate::config::DataDir;

pub fn set_var(data: &DataDir, key: &str, value: &str) -> Result<CommandStatus> {
    if key.is_empty() || value.is_empty() {
        bail!("both key and value are required");
    }
    data.environment.set(key, value)?;
    println!("{}", format!("✓ Set {key} = {value}").green());
    Ok(CommandStatus::Success)
}

pub fn get_var(data: &DataDir, key: &str) -> Result<CommandStatus> {
    match data.environment.get(key)?.filter(|value| !value.is_empty()) {
        Some(value) => {
            println!("{key} = {value}");
            Ok(CommandStatus::Success)
        }
        None => bail!("variable '{key}' not found"),
    }
}

pub fn list_vars(data: &DataDir) -> Result<CommandStatus> {
    let vars = data.environment.list()?;
    if vars.is_empty() {
        println!("{}", "No environment variables set".yellow());
        return Ok(CommandStatus::Success);
    }

    println!("\n{}\n", "Environment Variables".bold());
    for (key, value) in &vars {
        println!("  {} = {}", key.cyan(), value);
    }
    Ok(CommandStatus::Success)
}

pub fn delete_var(data: &DataDir, key: &str) -> Result<CommandStatus> {
    if !data.environment.delete(key)? {
        bail!("variable '{key}' not found");
    }
    println!("{}", format!("✓ Deleted {key}").green());
    Ok(CommandStatus::Success)
}
