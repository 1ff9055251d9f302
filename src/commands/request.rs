use anyhow::{Context, Result};
use colored::Colorize;

use super::CommandStatus;
use crate::config::DataDir;
use crate::executor::{effective_headers, execute, print_execution_result, print_request};
use crate::history::{HistoryEntry, ResponseSummary};
use crate::request::{Request, RequestInput};

/// Resolves `input` against the stored environment, sends it and records it.
pub async fn send_request(
    data: &DataDir,
    input: &RequestInput,
    verbose: bool,
) -> Result<CommandStatus> {
    let env = data.environment.list().context("loading environment")?;
    let request = input.resolve(&env)?;
    run_and_record(data, &request, verbose).await
}

/// Executes an already resolved request and appends it to history, whether it
/// completed or not. History keeps the headers as sent, defaults included.
pub(crate) async fn run_and_record(
    data: &DataDir,
    request: &Request,
    verbose: bool,
) -> Result<CommandStatus> {
    if verbose {
        print_request(request);
    }

    eprintln!("{}", "Sending request...".dimmed());
    let result = execute(request).await;
    print_execution_result(&result, verbose);

    let sent = Request {
        headers: effective_headers(request),
        ..request.clone()
    };
    data.history
        .append(HistoryEntry::new(&sent, ResponseSummary::from(&result)))
        .context("recording request in history")?;

    if !result.is_transport_failure() {
        println!("\n{}", "✓ Request saved to history".green());
    }
    Ok(CommandStatus::from(&result))
}
