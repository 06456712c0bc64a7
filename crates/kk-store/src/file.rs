//! File-backed store.
//!
//! The whole store is one JSON object mapping keys to string values:
//!
//! ```json
//! {"activeUser":"Ana","allergyFilterEnabled":"true","recipes":"[...]"}
//! ```
//!
//! Every write replaces the document through a temporary file in the same
//! directory followed by a rename, so readers never see a half-written file.

use std::collections::BTreeMap;
use std::io::Write as _;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, trace};

use crate::error::StoreError;
use crate::store::KeyValueStore;

/// A store persisted as a single JSON document on disk.
///
/// # Examples
///
/// ```no_run
/// use kk_store::{FileStore, KeyValueStore};
///
/// let mut store = FileStore::open("kitchen-kompanion.json")?;
/// store.set("allergyFilterEnabled", "true")?;
/// # Ok::<(), kk_store::StoreError>(())
/// ```
#[derive(Debug)]
pub struct FileStore {
    path: Utf8PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store; nothing is written until the first
    /// `set` or `remove`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be read and
    /// [`StoreError::Corrupt`] if it is not a JSON object of strings.
    pub fn open(path: impl Into<Utf8PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let entries = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => {
                serde_json::from_str(&text).map_err(|e| StoreError::corrupt(path.clone(), e))?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path, "Store document not found, starting empty");
                BTreeMap::new()
            }
            Err(e) => return Err(StoreError::io(path, e)),
        };

        debug!(path = %path, keys = entries.len(), "Opened store");
        Ok(Self { path, entries })
    }

    /// Returns the document path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn parent_dir(&self) -> &Utf8Path {
        match self.path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        }
    }

    fn persist(&self) -> Result<(), StoreError> {
        let dir = self.parent_dir();
        std::fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

        let text = serde_json::to_string(&self.entries)
            .map_err(|e| StoreError::serialize(self.path.as_str(), e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        tmp.write_all(text.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| StoreError::io(dir, e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(self.path.clone(), e.error))?;

        trace!(path = %self.path, bytes = text.len(), "Wrote store document");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let previous = self.entries.insert(key.to_owned(), value.to_owned());
        if let Err(e) = self.persist() {
            match previous {
                Some(old) => self.entries.insert(key.to_owned(), old),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let Some(previous) = self.entries.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.persist() {
            self.entries.insert(key.to_owned(), previous);
            return Err(e);
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_path(dir: &TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join(name)).unwrap()
    }

    #[test]
    fn test_open_missing_is_empty_and_does_not_create() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir, "kk.json");

        let store = FileStore::open(&path).unwrap();
        assert!(store.keys().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_set_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir, "kk.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("activeUser", "Ana").unwrap();
        store.set("allergyFilterEnabled", "true").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("activeUser").unwrap().as_deref(), Some("Ana"));
        assert_eq!(reopened.keys(), vec!["activeUser", "allergyFilterEnabled"]);
    }

    #[test]
    fn test_document_shape() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir, "kk.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("recipes", r#"[{"name":"Soup"}]"#).unwrap();
        store.set("activeUser", "").unwrap();

        insta::assert_snapshot!(
            std::fs::read_to_string(&path).unwrap(),
            @r#"{"activeUser":"","recipes":"[{\"name\":\"Soup\"}]"}"#
        );
    }

    #[test]
    fn test_remove_persists() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir, "kk.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("data", "<li>Milk<span>×</span></li>").unwrap();
        store.remove("data").unwrap();
        store.remove("data").unwrap();

        assert_eq!(FileStore::open(&path).unwrap().get("data").unwrap(), None);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir, "nested/deeper/kk.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("members", "[]").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_document_is_error() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir, "kk.json");
        std::fs::write(&path, "[not an object").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_blank_document_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir, "kk.json");
        std::fs::write(&path, "  \n").unwrap();

        assert!(FileStore::open(&path).unwrap().keys().is_empty());
    }
}
