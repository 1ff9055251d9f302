use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::collection::CollectionStore;
use crate::env::EnvironmentStore;
use crate::history::HistoryLog;
use crate::store::LoadMode;

use super::loader::{load_config, RestConfig};

/// Everything persisted under one base directory: configuration plus the
/// environment, history and collection stores.
#[derive(Debug, Clone)]
pub struct DataDir {
    pub config: RestConfig,
    pub environment: EnvironmentStore,
    pub history: HistoryLog,
    pub collections: CollectionStore,
}

impl DataDir {
    /// Loads `config.json` from `root` and opens the stores. `force_strict`
    /// enables strict loading regardless of the config file.
    pub fn open(root: &Path, force_strict: bool) -> Result<Self> {
        let config = load_config(root)?;
        let mode = LoadMode::from_strict(force_strict || config.strict);
        debug!(root = %root.display(), ?mode, "opening data directory");

        Ok(Self {
            environment: EnvironmentStore::new(root, mode),
            history: HistoryLog::new(root, mode),
            collections: CollectionStore::new(root, mode),
            config,
        })
    }
}
