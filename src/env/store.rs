use std::path::{Path, PathBuf};

use tracing::debug;

use crate::env::EnvMap;
use crate::store::{read_json, write_json, LoadMode, StoreError};

pub const ENVIRONMENT_FILE: &str = "environment.json";

/// Template variables persisted as a single JSON object.
///
/// Every mutation loads the map, applies the change and rewrites the file.
#[derive(Debug, Clone)]
pub struct EnvironmentStore {
    path: PathBuf,
    mode: LoadMode,
}

impl EnvironmentStore {
    pub fn new(base_dir: &Path, mode: LoadMode) -> Self {
        Self {
            path: base_dir.join(ENVIRONMENT_FILE),
            mode,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> Result<EnvMap, StoreError> {
        Ok(read_json(&self.path, self.mode)?.unwrap_or_default())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.list()?.remove(key))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut vars = self.list()?;
        vars.insert(key.to_string(), value.to_string());
        write_json(&self.path, &vars)?;
        debug!(key, "environment variable set");
        Ok(())
    }

    /// Removes `key`, returning whether it existed. The file is only rewritten
    /// when something changed.
    pub fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let mut vars = self.list()?;
        if vars.remove(key).is_none() {
            return Ok(false);
        }
        write_json(&self.path, &vars)?;
        debug!(key, "environment variable deleted");
        Ok(true)
    }
}
