use crate::history::ResponseSummary;

/// A response for which a status line was received, whatever the status.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedResponse {
    pub status: u16,
    pub reason: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub duration_secs: f64,
    pub size_bytes: usize,
}

impl CompletedResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Outcome of a single request. HTTP error statuses are still `Completed`;
/// `TransportFailure` means no response was obtained at all.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResult {
    Completed(CompletedResponse),
    TransportFailure { message: String, duration_secs: f64 },
}

impl ExecutionResult {
    pub fn duration_secs(&self) -> f64 {
        match self {
            ExecutionResult::Completed(response) => response.duration_secs,
            ExecutionResult::TransportFailure { duration_secs, .. } => *duration_secs,
        }
    }

    pub fn is_transport_failure(&self) -> bool {
        matches!(self, ExecutionResult::TransportFailure { .. })
    }
}

impl From<&ExecutionResult> for ResponseSummary {
    fn from(result: &ExecutionResult) -> Self {
        match result {
            ExecutionResult::Completed(response) => ResponseSummary {
                status: Some(response.status),
                duration_secs: response.duration_secs,
                size_bytes: Some(response.size_bytes),
            },
            ExecutionResult::TransportFailure { duration_secs, .. } => ResponseSummary {
                status: None,
                duration_secs: *duration_secs,
                size_bytes: None,
            },
        }
    }
}
