use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("reading {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("writing {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("parsing {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("serializing {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// How a store reacts to a file that exists but does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Corrupt data is logged and replaced by the empty default.
    #[default]
    Lenient,
    /// Corrupt data is reported as [`StoreError::Corrupt`].
    Strict,
}

impl LoadMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            LoadMode::Strict
        } else {
            LoadMode::Lenient
        }
    }
}

/// Reads a JSON document, returning `Ok(None)` when the file does not exist.
pub(crate) fn read_json<T: DeserializeOwned>(
    path: &Path,
    mode: LoadMode,
) -> Result<Option<T>, StoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "store file missing");
            return Ok(None);
        }
        Err(err) if mode == LoadMode::Lenient => {
            warn!(path = %path.display(), error = %err, "unreadable store file, using defaults");
            return Ok(None);
        }
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    match serde_json::from_str(&contents) {
        Ok(value) => Ok(Some(value)),
        Err(err) if mode == LoadMode::Lenient => {
            warn!(path = %path.display(), error = %err, "corrupt store file, using defaults");
            Ok(None)
        }
        Err(source) => Err(StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Rewrites the whole file, creating parent directories as needed.
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StoreError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut contents =
        serde_json::to_string_pretty(value).map_err(|source| StoreError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
    contents.push('\n');

    fs::write(path, contents).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "store file written");
    Ok(())
}
