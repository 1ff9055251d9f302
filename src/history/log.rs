use std::path::{Path, PathBuf};

use tracing::debug;

use super::{HistoryEntry, HistoryError};
use crate::store::{read_json, write_json, LoadMode};

pub const HISTORY_FILE: &str = "history.json";

/// Maximum number of entries kept on disk.
pub const HISTORY_LIMIT: usize = 100;

/// Bounded, oldest-first log of executed requests stored as a JSON array.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
    mode: LoadMode,
}

impl HistoryLog {
    pub fn new(base_dir: &Path, mode: LoadMode) -> Self {
        Self {
            path: base_dir.join(HISTORY_FILE),
            mode,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored entries, oldest first.
    pub fn entries(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        Ok(read_json(&self.path, self.mode)?.unwrap_or_default())
    }

    pub fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut entries = self.entries()?;
        entries.push(entry);
        if entries.len() > HISTORY_LIMIT {
            let excess = entries.len() - HISTORY_LIMIT;
            entries.drain(..excess);
            debug!(dropped = excess, "history trimmed");
        }
        write_json(&self.path, &entries)?;
        Ok(())
    }

    /// The most recent `limit` entries (or all of them), still oldest first.
    pub fn list(&self, limit: Option<usize>) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut entries = self.entries()?;
        if let Some(limit) = limit {
            let skip = entries.len().saturating_sub(limit);
            entries.drain(..skip);
        }
        Ok(entries)
    }

    /// `n = 1` is the most recently appended entry.
    pub fn get_by_recency(&self, n: usize) -> Result<HistoryEntry, HistoryError> {
        let mut entries = self.entries()?;
        let len = entries.len();
        if n == 0 || n > len {
            return Err(HistoryError::IndexOutOfRange { index: n, len });
        }
        Ok(entries.swap_remove(len - n))
    }

    pub fn last(&self) -> Result<Option<HistoryEntry>, HistoryError> {
        Ok(self.entries()?.pop())
    }
}
