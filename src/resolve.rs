//! Override resolution.
//!
//! Decides, field by field, whether a page uses its own value or falls back
//! to the global one, and reports why.
//!
//! # Resolution Law
//!
//! | Scope  | Page value        | Global value | Result                    |
//! |--------|-------------------|--------------|---------------------------|
//! | global | -                 | any          | `global`, global or empty |
//! | page   | set, == global    | set          | `inherited`, page value   |
//! | page   | set, != global    | any          | `unique`, page value      |
//! | page   | unset             | set          | `using_global`, global    |
//! | page   | unset             | unset        | `empty`, empty default    |
//!
//! "Unset" includes blank values (see [`crate::value::is_blank`]). Global-only
//! fields ignore the page value entirely.

use crate::{
    settings::{
        Scope, SettingsRecord,
        fields::{self, FIELDS},
    },
    value::{Fields, is_blank},
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Why a field resolved to its value. Computed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    /// Viewing the global scope itself.
    Global,
    /// Page value set and different from the global value.
    Unique,
    /// Page value set but equal to the global value.
    Inherited,
    /// Page value unset; the global value is used.
    UsingGlobal,
    /// Neither scope has a value.
    Empty,
}

impl ResolutionStatus {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Unique => "unique",
            Self::Inherited => "inherited",
            Self::UsingGlobal => "using_global",
            Self::Empty => "empty",
        }
    }

    /// Short label for override badges.
    pub const fn badge(self) -> &'static str {
        match self {
            Self::Global => "global default",
            Self::Unique => "unique to this page",
            Self::Inherited => "inherited",
            Self::UsingGlobal => "using global",
            Self::Empty => "not set",
        }
    }
}

impl fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Effective value of one field plus the reason it was chosen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolved {
    pub value: Value,
    pub status: ResolutionStatus,
}

impl Resolved {
    fn new(value: Value, status: ResolutionStatus) -> Self {
        Self { value, status }
    }
}

/// Resolve `key` for `scope` against a settings snapshot.
pub fn resolve(settings: &SettingsRecord, scope: &Scope, key: &str) -> Resolved {
    let empty = || fields::kind_of(key).empty_value();
    let global = settings
        .get(&Scope::Global, key)
        .filter(|value| !is_blank(value));

    if scope.is_global() {
        let value = global.cloned().unwrap_or_else(empty);
        return Resolved::new(value, ResolutionStatus::Global);
    }

    let page = if fields::is_global_only(key) {
        None
    } else {
        settings.get(scope, key).filter(|value| !is_blank(value))
    };

    match (page, global) {
        (Some(page), Some(global)) if page == global => {
            Resolved::new(page.clone(), ResolutionStatus::Inherited)
        }
        (Some(page), _) => Resolved::new(page.clone(), ResolutionStatus::Unique),
        (None, Some(global)) => Resolved::new(global.clone(), ResolutionStatus::UsingGlobal),
        (None, None) => Resolved::new(empty(), ResolutionStatus::Empty),
    }
}

// ============================================================================
// Effective Values
// ============================================================================

/// Every field of one scope, resolved.
///
/// Holds catalog fields in catalog order, then any extra keys found in the
/// global or page record in first-seen order. The reserved schema key is
/// never included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveValues {
    entries: Vec<(String, Resolved)>,
    values: Map<String, Value>,
}

impl EffectiveValues {
    /// Build from already-resolved pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, Resolved)>) -> Self {
        let entries: Vec<_> = pairs.into_iter().collect();
        let values = entries
            .iter()
            .map(|(key, resolved)| (key.clone(), resolved.value.clone()))
            .collect();
        Self { entries, values }
    }

    /// Value-only view, for null-safe reads.
    pub fn fields(&self) -> Fields<'_> {
        Fields::from_map(&self.values)
    }

    pub fn get(&self, key: &str) -> Option<&Resolved> {
        self.entries
            .iter()
            .find_map(|(k, resolved)| (k == key).then_some(resolved))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Resolved)> {
        self.entries.iter().map(|(key, resolved)| (key.as_str(), resolved))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve every known and present field for `scope`.
pub fn effective_values(settings: &SettingsRecord, scope: &Scope) -> EffectiveValues {
    let mut keys: Vec<&str> = FIELDS.iter().map(|def| def.key).collect();

    let extra_sources = [settings.scope(&Scope::Global), settings.scope(scope)];
    for record in extra_sources.into_iter().flatten() {
        for key in record.keys() {
            if key != fields::SCHEMA_ENTRIES && !keys.contains(&key.as_str()) {
                keys.push(key.as_str());
            }
        }
    }

    EffectiveValues::from_pairs(
        keys.into_iter()
            .map(|key| (key.to_owned(), resolve(settings, scope, key))),
    )
}
