mod log;
mod models;

use thiserror::Error;

use crate::store::StoreError;

pub use log::{HistoryLog, HISTORY_FILE, HISTORY_LIMIT};
pub use models::{HistoryEntry, ResponseSummary};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid history index: {index} (history holds {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },
}
