use tracing::warn;

use super::Headers;

/// Parses `Key: Value` lines, splitting at the first colon and trimming both
/// sides. Lines without a colon are skipped; a repeated name keeps the last
/// value.
pub fn parse_headers<S: AsRef<str>>(lines: &[S]) -> Headers {
    let mut headers = Headers::new();
    for line in lines {
        let line = line.as_ref();
        match line.split_once(':') {
            Some((name, value)) => {
                headers.insert(name.trim().to_string(), value.trim().to_string());
            }
            None => warn!(header = line, "ignoring header without ':' separator"),
        }
    }
    headers
}
