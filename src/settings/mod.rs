//! Scope-keyed settings snapshots.
//!
//! # Layout
//!
//! ```text
//! SettingsRecord
//!   ├── "global"      → ScopeRecord { field → value, schema_entries → [...] }
//!   ├── "<page id>"   → ScopeRecord { ... }      (created on first write)
//!   └── ...
//! ```
//!
//! A `SettingsRecord` is an immutable snapshot. Edits are staged with
//! `with_scope` / `with_field`, which return a new snapshot, and are flushed
//! to a [`store::ScopeStore`] one whole scope at a time.

pub mod fields;
pub mod store;

use crate::schema::{SchemaEntry, entries_from_value};
use serde::Serialize;
use serde_json::{Map, Value};
use std::{collections::BTreeMap, fmt};

/// Flat field-value record of one scope.
pub type ScopeRecord = Map<String, Value>;

// ============================================================================
// Scope
// ============================================================================

/// Settings namespace: the single global scope or one page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    Global,
    Page(String),
}

impl Scope {
    /// Record key of the global scope.
    pub const GLOBAL_KEY: &'static str = "global";

    /// Page scope with this exact id. Ids coming from outside go through
    /// [`Scope::parse`] so `"global"` maps to the global scope.
    pub fn page(id: impl Into<String>) -> Self {
        Self::Page(id.into())
    }

    /// Parse a record key. `"global"` is always the global scope.
    pub fn parse(key: &str) -> Self {
        let key = key.trim();
        if key == Self::GLOBAL_KEY {
            Self::Global
        } else {
            Self::Page(key.to_owned())
        }
    }

    /// Record key for this scope.
    pub fn key(&self) -> &str {
        match self {
            Self::Global => Self::GLOBAL_KEY,
            Self::Page(id) => id,
        }
    }

    pub const fn is_global(&self) -> bool {
        matches!(self, Self::Global)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ============================================================================
// Settings Record
// ============================================================================

/// Snapshot of every scope's settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SettingsRecord {
    scopes: BTreeMap<String, ScopeRecord>,
}

impl SettingsRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from raw JSON.
    ///
    /// Scopes whose value is not a record are dropped; a non-object root
    /// yields an empty snapshot.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(root) = value else {
            return Self::default();
        };
        let scopes = root
            .into_iter()
            .filter_map(|(key, record)| match record {
                Value::Object(record) => Some((Scope::parse(&key).key().to_owned(), record)),
                _ => None,
            })
            .collect();
        Self { scopes }
    }

    pub fn to_value(&self) -> Value {
        Value::Object(
            self.scopes
                .iter()
                .map(|(key, record)| (key.clone(), Value::Object(record.clone())))
                .collect(),
        )
    }

    /// Record of a scope, if that scope has ever been written.
    pub fn scope(&self, scope: &Scope) -> Option<&ScopeRecord> {
        self.scopes.get(scope.key())
    }

    /// Stored value of `key` in `scope`, if set.
    pub fn get(&self, scope: &Scope, key: &str) -> Option<&Value> {
        self.scope(scope)?.get(key)
    }

    /// All scopes present in the snapshot, global first.
    pub fn scopes(&self) -> impl Iterator<Item = (Scope, &ScopeRecord)> {
        let global = self
            .scopes
            .get(Scope::GLOBAL_KEY)
            .map(|record| (Scope::Global, record));
        let pages = self
            .scopes
            .iter()
            .filter(|(key, _)| key.as_str() != Scope::GLOBAL_KEY)
            .map(|(key, record)| (Scope::page(key.clone()), record));
        global.into_iter().chain(pages)
    }

    /// Page scopes present in the snapshot.
    pub fn page_scopes(&self) -> impl Iterator<Item = (Scope, &ScopeRecord)> {
        self.scopes().filter(|(scope, _)| !scope.is_global())
    }

    /// New snapshot with `scope` replaced wholesale.
    pub fn with_scope(&self, scope: &Scope, record: ScopeRecord) -> Self {
        let mut scopes = self.scopes.clone();
        scopes.insert(scope.key().to_owned(), record);
        Self { scopes }
    }

    /// New snapshot with a single field set, creating the scope if needed.
    pub fn with_field(&self, scope: &Scope, key: &str, value: Value) -> Self {
        let mut record = self.scope(scope).cloned().unwrap_or_default();
        record.insert(key.to_owned(), value);
        self.with_scope(scope, record)
    }

    /// Schema entries saved under `scope`, leniently decoded.
    pub fn schema_entries(&self, scope: &Scope) -> Vec<SchemaEntry> {
        self.get(scope, fields::SCHEMA_ENTRIES)
            .map(entries_from_value)
            .unwrap_or_default()
    }
}
