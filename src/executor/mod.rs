mod format;
mod models;
mod printer;
mod runner;

pub use format::{format_duration, format_size, pretty_body, truncate_chars};
pub use models::{CompletedResponse, ExecutionResult};
pub use printer::{
    print_execution_result, print_request, render_execution_result, render_request,
    status_color,
};
pub use runner::{effective_headers, execute, USER_AGENT};
