//! Named requests saved from history, one JSON file per name.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::history::{HistoryEntry, HistoryError, HistoryLog};
use crate::request::{Headers, Method, Request};
use crate::store::{read_json, write_json, LoadMode, StoreError};

pub const COLLECTIONS_DIR: &str = "collections";

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("invalid collection name: {0:?}")]
    InvalidName(String),
    #[error("collection '{0}' not found")]
    NotFound(String),
    #[error("no requests in history to save")]
    EmptyHistory,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    History(#[from] HistoryError),
}

/// A saved request. Timeout and history metadata are not part of it; extra
/// fields in the file are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub method: Method,
    pub url: String,
    #[serde(default)]
    pub headers: Headers,
    #[serde(default)]
    pub body: Option<String>,
}

impl Collection {
    pub fn to_request(&self, timeout_secs: u64) -> Request {
        Request {
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
            timeout_secs,
        }
    }
}

impl From<&HistoryEntry> for Collection {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            method: entry.method,
            url: entry.url.clone(),
            headers: entry.headers.clone(),
            body: entry.body.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSummary {
    pub name: String,
    pub method: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct CollectionStore {
    dir: PathBuf,
    mode: LoadMode,
}

impl CollectionStore {
    pub fn new(base_dir: &Path, mode: LoadMode) -> Self {
        Self {
            dir: base_dir.join(COLLECTIONS_DIR),
            mode,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, name: &str) -> Result<PathBuf, CollectionError> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{name}.json")))
    }

    /// Writes `entry` as collection `name`, replacing any previous one.
    pub fn save(&self, name: &str, entry: &HistoryEntry) -> Result<PathBuf, CollectionError> {
        let path = self.file_for(name)?;
        write_json(&path, &Collection::from(entry))?;
        info!(name, path = %path.display(), "collection saved");
        Ok(path)
    }

    /// Snapshots the most recent history entry. Fails without touching disk
    /// when history is empty.
    pub fn save_last(
        &self,
        name: &str,
        history: &HistoryLog,
    ) -> Result<HistoryEntry, CollectionError> {
        validate_name(name)?;
        let entry = history.last()?.ok_or(CollectionError::EmptyHistory)?;
        self.save(name, &entry)?;
        Ok(entry)
    }

    /// Missing and unparseable files both yield `None` unless the store is
    /// strict, in which case unparseable files are an error.
    pub fn load(&self, name: &str) -> Result<Option<Collection>, CollectionError> {
        let path = self.file_for(name)?;
        Ok(read_json(&path, self.mode)?)
    }

    /// Saved collections sorted by name.
    pub fn list(&self) -> Result<Vec<CollectionSummary>, CollectionError> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.dir.clone(),
                    source,
                }
                .into())
            }
        };

        let mut summaries = Vec::new();
        for dir_entry in read_dir {
            let path = dir_entry
                .map_err(|source| StoreError::Read {
                    path: self.dir.clone(),
                    source,
                })?
                .path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let raw: Value = read_json(&path, self.mode)?.unwrap_or(Value::Null);
            summaries.push(CollectionSummary {
                name: name.to_string(),
                method: raw
                    .get("method")
                    .and_then(Value::as_str)
                    .unwrap_or("GET")
                    .to_string(),
                url: raw
                    .get("url")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            });
        }

        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(summaries)
    }

    pub fn delete(&self, name: &str) -> Result<bool, CollectionError> {
        let path = self.file_for(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(name, "collection deleted");
                Ok(true)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Write { path, source }.into()),
        }
    }
}

fn validate_name(name: &str) -> Result<(), CollectionError> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(CollectionError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::ResponseSummary;
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn entry(method: Method, url: &str) -> HistoryEntry {
        let mut request = Request::new(method, url);
        request
            .headers
            .insert("Authorization".to_string(), "Bearer abc".to_string());
        request.body = Some("{\"ok\":true}".to_string());
        HistoryEntry::new(
            &request,
            ResponseSummary {
                status: Some(200),
                duration_secs: 0.1,
                size_bytes: Some(2),
            },
        )
    }

    #[test]
    fn save_then_load_matches_entry() -> Result<()> {
        let temp = tempdir()?;
        let store = CollectionStore::new(temp.path(), LoadMode::Lenient);
        let last = entry(Method::Post, "https://api.example.com/users");

        store.save("create-user", &last)?;
        let loaded = store.load("create-user")?.expect("collection exists");

        assert_eq!(loaded.method, last.method);
        assert_eq!(loaded.url, last.url);
        assert_eq!(loaded.headers, last.headers);
        assert_eq!(loaded.body, last.body);
        Ok(())
    }

    #[test]
    fn save_last_snapshots_most_recent_history_entry() -> Result<()> {
        let temp = tempdir()?;
        let history = HistoryLog::new(temp.path(), LoadMode::Lenient);
        history.append(entry(Method::Get, "https://example.com/first"))?;
        history.append(entry(Method::Delete, "https://example.com/second"))?;

        let store = CollectionStore::new(temp.path(), LoadMode::Lenient);
        let saved = store.save_last("latest", &history)?;
        assert_eq!(saved.url, "https://example.com/second");

        let loaded = store.load("latest")?.expect("collection exists");
        assert_eq!(loaded.method, Method::Delete);
        Ok(())
    }

    #[test]
    fn save_last_with_empty_history_creates_nothing() -> Result<()> {
        let temp = tempdir()?;
        let history = HistoryLog::new(temp.path(), LoadMode::Lenient);
        let store = CollectionStore::new(temp.path(), LoadMode::Lenient);

        let err = store.save_last("nothing", &history).unwrap_err();
        assert!(matches!(err, CollectionError::EmptyHistory));
        assert!(store.load("nothing")?.is_none());
        assert!(store.list()?.is_empty());
        Ok(())
    }

    #[test]
    fn save_overwrites_existing_collection() -> Result<()> {
        let temp = tempdir()?;
        let store = CollectionStore::new(temp.path(), LoadMode::Lenient);
        store.save("item", &entry(Method::Get, "https://example.com/v1"))?;
        store.save("item", &entry(Method::Put, "https://example.com/v2"))?;

        let loaded = store.load("item")?.expect("collection exists");
        assert_eq!(loaded.method, Method::Put);
        assert_eq!(loaded.url, "https://example.com/v2");
        assert_eq!(store.list()?.len(), 1);
        Ok(())
    }

    #[test]
    fn load_missing_collection_is_none() -> Result<()> {
        let temp = tempdir()?;
        let store = CollectionStore::new(temp.path(), LoadMode::Lenient);
        assert!(store.load("ghost")?.is_none());
        Ok(())
    }

    #[test]
    fn load_ignores_history_metadata_fields() -> Result<()> {
        let temp = tempdir()?;
        let store = CollectionStore::new(temp.path(), LoadMode::Lenient);
        fs::create_dir_all(store.dir())?;
        fs::write(
            store.dir().join("legacy.json"),
            r#"{"timestamp": "2024-01-15T10:30:00", "method": "GET",
                "url": "https://example.com", "headers": {}, "body": null,
                "response": {"status": 200, "duration": 0.1, "size": 10}}"#,
        )?;

        let loaded = store.load("legacy")?.expect("collection exists");
        assert_eq!(loaded.url, "https://example.com");
        assert!(loaded.headers.is_empty());
        Ok(())
    }

    #[test]
    fn corrupt_collection_loads_as_not_found() -> Result<()> {
        let temp = tempdir()?;
        let store = CollectionStore::new(temp.path(), LoadMode::Lenient);
        fs::create_dir_all(store.dir())?;
        fs::write(store.dir().join("broken.json"), "{{{")?;

        assert!(store.load("broken")?.is_none());
        let listed = store.list()?;
        assert_eq!(
            listed,
            vec![CollectionSummary {
                name: "broken".to_string(),
                method: "GET".to_string(),
                url: String::new(),
            }]
        );

        let strict = CollectionStore::new(temp.path(), LoadMode::Strict);
        assert!(strict.load("broken").is_err());
        Ok(())
    }

    #[test]
    fn list_is_sorted_by_name_and_skips_other_files() -> Result<()> {
        let temp = tempdir()?;
        let store = CollectionStore::new(temp.path(), LoadMode::Lenient);
        store.save("zeta", &entry(Method::Get, "https://example.com/z"))?;
        store.save("alpha", &entry(Method::Post, "https://example.com/a"))?;
        fs::write(store.dir().join("notes.txt"), "ignored")?;

        let names: Vec<_> = store.list()?.into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["alpha".to_string(), "zeta".to_string()]);
        Ok(())
    }

    #[test]
    fn delete_reports_whether_collection_existed() -> Result<()> {
        let temp = tempdir()?;
        let store = CollectionStore::new(temp.path(), LoadMode::Lenient);
        store.save("temp", &entry(Method::Get, "https://example.com"))?;

        assert!(store.delete("temp")?);
        assert!(!store.delete("temp")?);
        assert!(store.load("temp")?.is_none());
        Ok(())
    }

    #[test]
    fn rejects_names_that_escape_the_directory() {
        let temp = tempdir().unwrap();
        let store = CollectionStore::new(temp.path(), LoadMode::Lenient);
        for name in ["", "  ", "..", "../evil", "a/b", "a\\b"] {
            let err = store.load(name).unwrap_err();
            assert!(matches!(err, CollectionError::InvalidName(_)), "{name}");
        }
    }
}
