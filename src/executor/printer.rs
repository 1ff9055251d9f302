use std::fmt::Write as _;

use colored::{Color, Colorize};

use crate::request::Request;

use super::format::{format_duration, format_size, pretty_body, truncate_chars};
use super::models::{CompletedResponse, ExecutionResult};
use super::runner::effective_headers;

const VERBOSE_BODY_LIMIT: usize = 1000;

pub fn status_color(status: u16) -> Color {
    if status < 300 {
        Color::Green
    } else if status < 400 {
        Color::Yellow
    } else {
        Color::Red
    }
}

pub fn print_request(request: &Request) {
    print!("{}", render_request(request));
}

pub fn print_execution_result(result: &ExecutionResult, verbose: bool) {
    print!("{}", render_execution_result(result, verbose));
}

/// Method, URL, the headers as they will be sent, and the body.
pub fn render_request(request: &Request) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", "→ Request".bold().blue());
    let _ = writeln!(out, "{} {}", request.method.as_str().bold(), request.url);

    let headers = effective_headers(request);
    if !headers.is_empty() {
        let _ = writeln!(out, "\n{}", "Headers:".dimmed());
        for (name, value) in &headers {
            let _ = writeln!(out, "  {} {}", format!("{name}:").cyan(), value);
        }
    }

    if let Some(body) = request.body.as_deref().filter(|body| !body.is_empty()) {
        let _ = writeln!(out, "\n{}", "Body:".dimmed());
        let _ = writeln!(out, "{}", pretty_body(body));
    }
    out
}

pub fn render_execution_result(result: &ExecutionResult, verbose: bool) -> String {
    match result {
        ExecutionResult::Completed(response) if verbose => render_verbose_response(response),
        ExecutionResult::Completed(response) => render_response(response),
        ExecutionResult::TransportFailure {
            message,
            duration_secs,
        } => {
            let mut out = String::new();
            let _ = writeln!(out, "\n{}", format!("✗ Error: {message}").red());
            let _ = writeln!(
                out,
                "{}",
                format!("Duration: {}", format_duration(*duration_secs)).dimmed()
            );
            out
        }
    }
}

fn status_line(response: &CompletedResponse) -> String {
    format!("{} {}", response.status, response.reason)
        .color(status_color(response.status))
        .bold()
        .to_string()
}

fn render_response(response: &CompletedResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", status_line(response));
    let _ = writeln!(
        out,
        "{}",
        format!(
            "Time: {} | Size: {}",
            format_duration(response.duration_secs),
            format_size(response.size_bytes)
        )
        .dimmed()
    );
    if !response.body.is_empty() {
        let _ = writeln!(out, "\n{}", pretty_body(&response.body));
    }
    out
}

fn render_verbose_response(response: &CompletedResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", "← Response".bold().blue());
    let _ = writeln!(out, "{}", status_line(response));
    let _ = writeln!(
        out,
        "{}",
        format!("Time: {}", format_duration(response.duration_secs)).dimmed()
    );
    let _ = writeln!(
        out,
        "{}",
        format!("Size: {}", format_size(response.size_bytes)).dimmed()
    );

    let _ = writeln!(out, "\n{}", "Headers:".dimmed());
    for (name, value) in &response.headers {
        let _ = writeln!(out, "  {} {}", format!("{name}:").cyan(), value);
    }

    let _ = writeln!(out, "\n{}", "Body:".dimmed());
    let is_json = response
        .header("Content-Type")
        .is_some_and(|value| value.contains("application/json"));
    if is_json {
        let _ = writeln!(out, "{}", pretty_body(&response.body));
    } else {
        let (shown, remaining) = truncate_chars(&response.body, VERBOSE_BODY_LIMIT);
        let _ = writeln!(out, "{shown}");
        if remaining > 0 {
            let _ = writeln!(
                out,
                "\n{}",
                format!("... ({remaining} more characters)").dimmed()
            );
        }
    }
    out
}
