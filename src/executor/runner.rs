use std::{error::Error as _, time::Duration, time::Instant};

use reqwest::{header::HeaderMap, Client};
use tracing::{debug, info};

use crate::request::{Headers, Method, Request};

use super::models::{CompletedResponse, ExecutionResult};

pub const USER_AGENT: &str = concat!("restcli/", env!("CARGO_PKG_VERSION"));

/// The headers that will actually be sent: the request's own plus a
/// `User-Agent`, and a JSON `Content-Type` when a body is present. Existing
/// headers are never overridden.
pub fn effective_headers(request: &Request) -> Headers {
    let mut headers = request.headers.clone();
    if !request.has_header("User-Agent") {
        headers.insert("User-Agent".to_string(), USER_AGENT.to_string());
    }
    if request.payload().is_some() && !request.has_header("Content-Type") {
        headers.insert("Content-Type".to_string(), "application/json".to_string());
    }
    headers
}

/// Sends `request` once. Never retries and never returns an error: anything
/// that prevents a status line from arriving becomes a transport failure.
pub async fn execute(request: &Request) -> ExecutionResult {
    let client = match Client::builder()
        .timeout(Duration::from_secs(request.timeout_secs))
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            return ExecutionResult::TransportFailure {
                message: describe_error(&err, request.timeout_secs),
                duration_secs: 0.0,
            }
        }
    };

    let mut builder = client.request(to_reqwest_method(request.method), &request.url);
    for (name, value) in effective_headers(request) {
        builder = builder.header(name, value);
    }
    if let Some(body) = request.payload() {
        builder = builder.body(body.to_string());
    }

    debug!(method = %request.method, url = %request.url, "sending request");
    let start = Instant::now();
    let outcome = async {
        let response = builder.send().await?;
        let status = response.status();
        let headers = collect_headers(response.headers());
        let bytes = response.bytes().await?;
        Ok::<_, reqwest::Error>((status, headers, bytes))
    }
    .await;
    let duration_secs = start.elapsed().as_secs_f64();

    match outcome {
        Ok((status, headers, bytes)) => {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            info!(status = status.as_u16(), duration_secs, "request completed");
            ExecutionResult::Completed(CompletedResponse {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                headers,
                size_bytes: body.len(),
                body,
                duration_secs,
            })
        }
        Err(err) => {
            let message = describe_error(&err, request.timeout_secs);
            info!(error = %message, duration_secs, "request failed");
            ExecutionResult::TransportFailure {
                message,
                duration_secs,
            }
        }
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
        Method::Patch => reqwest::Method::PATCH,
    }
}

fn describe_error(err: &reqwest::Error, timeout_secs: u64) -> String {
    if err.is_timeout() {
        return format!("request timed out after {timeout_secs}s");
    }

    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = inner.source();
    }
    message
}

fn collect_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}
