//! Command handlers behind the CLI verbs. Each prints its own output and
//! returns whether the invocation should exit successfully.

pub mod collection;
pub mod env;
pub mod history;
pub mod request;

use std::process::ExitCode;

use crate::executor::ExecutionResult;

pub use history::{replay, show_history};
pub use request::send_request;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    /// The failure has already been reported to the user.
    Failure,
}

impl From<&ExecutionResult> for CommandStatus {
    fn from(result: &ExecutionResult) -> Self {
        if result.is_transport_failure() {
            CommandStatus::Failure
        } else {
            CommandStatus::Success
        }
    }
}

impl From<CommandStatus> for ExitCode {
    fn from(status: CommandStatus) -> Self {
        match status {
            CommandStatus::Success => ExitCode::SUCCESS,
            CommandStatus::Failure => ExitCode::FAILURE,
        }
    }
}
