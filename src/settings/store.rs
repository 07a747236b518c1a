//! Persistence boundary for settings snapshots.
//!
//! The engine only ever sees a fully loaded [`SettingsRecord`]. Writes go out
//! through [`ScopeStore::replace_scope`], which swaps one scope's record as a
//! whole; there is no field-level merge and the last write wins.

use super::{Scope, ScopeRecord, SettingsRecord};
use parking_lot::RwLock;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Errors raised by a settings store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error when accessing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("settings file `{0}` is not valid JSON")]
    Json(PathBuf, #[source] serde_json::Error),
}

/// Get/replace contract of the persistence collaborator.
pub trait ScopeStore {
    /// Load the full settings record.
    fn snapshot(&self) -> Result<SettingsRecord, StoreError>;

    /// Replace one scope's record wholesale.
    fn replace_scope(&self, scope: &Scope, record: ScopeRecord) -> Result<(), StoreError>;
}

// ============================================================================
// In-memory Store
// ============================================================================

/// Store kept entirely in memory.
///
/// # Thread Safety
///
/// Uses `RwLock` so snapshots can be taken concurrently while a write
/// replaces a scope atomically.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: RwLock<SettingsRecord>,
}

impl MemoryStore {
    pub fn new(record: SettingsRecord) -> Self {
        Self {
            record: RwLock::new(record),
        }
    }
}

impl ScopeStore for MemoryStore {
    fn snapshot(&self) -> Result<SettingsRecord, StoreError> {
        Ok(self.record.read().clone())
    }

    fn replace_scope(&self, scope: &Scope, record: ScopeRecord) -> Result<(), StoreError> {
        let mut current = self.record.write();
        *current = current.with_scope(scope, record);
        Ok(())
    }
}

// ============================================================================
// File Store
// ============================================================================

/// Store backed by a single JSON file.
///
/// A missing file reads as an empty record. Each `replace_scope` rewrites
/// the whole file through a sibling temp file, so readers never see a
/// partial write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file a write goes to before it replaces `path`.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ScopeStore for FileStore {
    fn snapshot(&self) -> Result<SettingsRecord, StoreError> {
        if !self.path.exists() {
            return Ok(SettingsRecord::default());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|err| StoreError::Io(self.path.clone(), err))?;
        if content.trim().is_empty() {
            return Ok(SettingsRecord::default());
        }
        let value = serde_json::from_str(&content)
            .map_err(|err| StoreError::Json(self.path.clone(), err))?;
        Ok(SettingsRecord::from_value(value))
    }

    fn replace_scope(&self, scope: &Scope, record: ScopeRecord) -> Result<(), StoreError> {
        let updated = self.snapshot()?.with_scope(scope, record);
        let json = serde_json::to_string_pretty(&updated)
            .map_err(|err| StoreError::Json(self.path.clone(), err))?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|err| StoreError::Io(parent.to_path_buf(), err))?;
        }
        let temp = self.temp_path();
        fs::write(&temp, json).map_err(|err| StoreError::Io(temp.clone(), err))?;
        fs::rename(&temp, &self.path).map_err(|err| StoreError::Io(self.path.clone(), err))
    }
}
