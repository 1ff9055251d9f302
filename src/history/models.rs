use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::request::{Headers, Method, Request};

/// What the history keeps of a response. `status` and `size_bytes` are absent
/// when no HTTP response was received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseSummary {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(rename = "duration", default)]
    pub duration_secs: f64,
    #[serde(rename = "size", default)]
    pub size_bytes: Option<usize>,
}

/// One executed request. Entries are immutable once appended and are addressed
/// only by their position in the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub method: Method,
    pub url: String,
    #[serde(default)]
    pub headers: Headers,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub response: ResponseSummary,
}

impl HistoryEntry {
    /// Records `request` as sent, stamped with the current local time.
    pub fn new(request: &Request, response: ResponseSummary) -> Self {
        Self {
            timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Micros, false),
            method: request.method,
            url: request.url.clone(),
            headers: request.headers.clone(),
            body: request.body.clone(),
            response,
        }
    }

    /// Rebuilds the request exactly as recorded. No substitution is applied.
    pub fn to_request(&self, timeout_secs: u64) -> Request {
        Request {
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
            timeout_secs,
        }
    }

    /// Parses the timestamp, accepting both RFC 3339 and offset-less
    /// ISO-8601 values.
    pub fn recorded_at(&self) -> Option<NaiveDateTime> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|dt| dt.naive_local())
            .or_else(|_| NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f"))
            .ok()
    }
}
