//! Preference persistence
//!
//! A single string key holds the last chosen offset as decimal text.
//! Writes are last-write-wins; there is no versioning.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use deci_core::{DeciError, DeciResult};

/// Key under which the chosen offset is stored
pub const OFFSET_KEY: &str = "decimalClockTimezone";

/// String key-value store
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> DeciResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> DeciResult<()>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> DeciResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> DeciResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a flat JSON object on disk.
///
/// The file is read once when opened; every `set` rewrites it through a
/// temporary file and a rename.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open `path`. A missing file is an empty store; an unreadable or
    /// malformed file is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> DeciResult<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<BTreeMap<String, String>>(&text) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "ignoring malformed preference file"
                    );
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(DeciError::Storage(format!("{}: {e}", path.display()))),
        };

        tracing::debug!(path = %path.display(), entries = values.len(), "opened preference store");
        Ok(JsonFileStore { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> DeciResult<()> {
        let storage_err =
            |e: std::io::Error| DeciError::Storage(format!("{}: {e}", self.path.display()));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(storage_err)?;
        }

        let text = serde_json::to_string_pretty(&self.values)
            .map_err(|e| DeciError::Storage(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text).map_err(storage_err)?;
        fs::rename(&tmp, &self.path).map_err(storage_err)?;
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> DeciResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> DeciResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}
