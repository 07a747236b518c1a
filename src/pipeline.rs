//! Render pipeline: settings snapshot → resolved values → output blocks.
//!
//! # Stages
//!
//! ```text
//! SettingsRecord ──► effective_values ──────────────┐
//!        │                                          │
//!        ├──► merge_entries ──► build_documents ────┤
//!        │                                          ├──► Composer::compose
//! pages ─┴──► build_hierarchy ──► path_for ─────────┘
//! ```
//!
//! Every stage is pure. `render_all` fans scopes out over rayon; each scope
//! renders independently from the same immutable snapshot.

use crate::{
    breadcrumb::{BreadcrumbOptions, Crumb, Hierarchy, PageDescriptor, PageKind, path_for},
    config::SeoConfig,
    log,
    output::{Composer, OutputBlocks, tracking::ScriptPolicy},
    resolve::effective_values,
    schema::{CardinalityViolation, SchemaEntry, build_documents, check_cardinality, merge_entries},
    settings::{Scope, SettingsRecord, fields},
    value::Fields,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// File names written per scope by [`write_blocks`].
pub const BLOCK_FILES: [&str; 3] = ["head.html", "body.html", "footer.html"];

// ============================================================================
// Pipeline
// ============================================================================

/// Composer plus the site-wide breadcrumb defaults.
#[derive(Debug, Clone)]
pub struct Pipeline {
    composer: Composer,
    breadcrumbs_enabled: bool,
    home_label: Option<String>,
}

impl Pipeline {
    pub fn new(composer: Composer) -> Self {
        Self {
            composer,
            breadcrumbs_enabled: true,
            home_label: None,
        }
    }

    pub fn from_config(config: &SeoConfig) -> Self {
        Self::new(config.composer())
            .with_breadcrumbs(config.breadcrumbs.enable, config.breadcrumbs.home_label.clone())
    }

    /// Defaults used when no scope sets `breadcrumbs_enabled` or
    /// `breadcrumb_home_label`.
    pub fn with_breadcrumbs(mut self, enabled: bool, home_label: Option<String>) -> Self {
        self.breadcrumbs_enabled = enabled;
        self.home_label = home_label;
        self
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Compose the three blocks of one scope.
    pub fn render(&self, settings: &SettingsRecord, scope: &Scope, pages: &Hierarchy) -> OutputBlocks {
        let values = effective_values(settings, scope);
        let policy = ScriptPolicy::from_fields(&values.fields());
        let documents = self.documents(settings, scope);
        let crumbs = self.crumbs(settings, scope, pages);
        self.composer.compose(&values, &documents, &crumbs, &policy)
    }

    /// Render every scope in parallel, keeping the input order.
    pub fn render_all(
        &self,
        settings: &SettingsRecord,
        scopes: &[Scope],
        pages: &Hierarchy,
    ) -> Vec<(Scope, OutputBlocks)> {
        scopes
            .par_iter()
            .map(|scope| (scope.clone(), self.render(settings, scope, pages)))
            .collect()
    }

    /// Built schema documents for `scope`, in merge order.
    ///
    /// Entries that are not ready to publish are left out and logged.
    pub fn documents(&self, settings: &SettingsRecord, scope: &Scope) -> Vec<Value> {
        let entries = entries_for(settings, scope);
        let (documents, skipped) = build_documents(&entries);
        for entry in skipped {
            log!(
                "schema";
                "{scope}: skipped `{}` ({}), required fields missing",
                entry.id,
                entry.schema_type
            );
        }
        documents
    }

    /// Breadcrumb trail for a page scope; empty when disabled or global.
    pub fn crumbs(&self, settings: &SettingsRecord, scope: &Scope, pages: &Hierarchy) -> Vec<Crumb> {
        let Scope::Page(id) = scope else {
            return Vec::new();
        };
        if !self.breadcrumbs_enabled_for(settings, scope) {
            return Vec::new();
        }
        let mut options = BreadcrumbOptions::from_settings(settings);
        if options.home_label.is_none() {
            options.home_label = self.home_label.clone();
        }
        path_for(id, pages, self.composer.site(), &options)
    }

    /// Page value, else global value, else the configured default.
    fn breadcrumbs_enabled_for(&self, settings: &SettingsRecord, scope: &Scope) -> bool {
        [scope, &Scope::Global]
            .into_iter()
            .find_map(|scope| {
                let record = settings.scope(scope)?;
                Fields::from_map(record).opt_flag(fields::BREADCRUMBS_ENABLED)
            })
            .unwrap_or(self.breadcrumbs_enabled)
    }
}

// ============================================================================
// Scope Helpers
// ============================================================================

/// Schema entries that apply to `scope`.
///
/// Pages inherit global entries unless `schema_inherit_global` is turned off
/// on the page; it defaults to on.
pub fn entries_for(settings: &SettingsRecord, scope: &Scope) -> Vec<SchemaEntry> {
    let global = settings.schema_entries(&Scope::Global);
    if scope.is_global() {
        return global;
    }
    let inherit = settings
        .scope(scope)
        .and_then(|record| Fields::from_map(record).opt_flag(fields::SCHEMA_INHERIT_GLOBAL))
        .unwrap_or(true);
    merge_entries(&global, &settings.schema_entries(scope), inherit)
}

/// Global scope, then every known page, then pages that only exist in the
/// settings record. Global placeholder pages stand for the global scope and
/// are not listed again.
pub fn all_scopes(settings: &SettingsRecord, pages: &Hierarchy) -> Vec<Scope> {
    let mut scopes = vec![Scope::Global];
    let known = pages
        .iter()
        .filter(|node| node.page.kind != PageKind::Global)
        .map(|node| Scope::parse(&node.page.id));
    let stored = settings.page_scopes().map(|(scope, _)| scope);
    for scope in known.chain(stored) {
        if !scopes.contains(&scope) {
            scopes.push(scope);
        }
    }
    scopes
}

/// Cardinality violations of every scope's own entries.
pub fn cardinality_report(settings: &SettingsRecord) -> Vec<(Scope, CardinalityViolation)> {
    settings
        .scopes()
        .flat_map(|(scope, _)| {
            check_cardinality(&settings.schema_entries(&scope))
                .into_iter()
                .map(move |violation| (scope.clone(), violation))
        })
        .collect()
}

// ============================================================================
// Files
// ============================================================================

/// Load page descriptors from a JSON array. A missing file is an empty list.
pub fn load_pages(path: &Path) -> Result<Vec<PageDescriptor>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read page list `{}`", path.display()))?;
    let pages = serde_json::from_str(&content)
        .with_context(|| format!("Invalid page list `{}`", path.display()))?;
    Ok(pages)
}

/// Directory name for a scope's output; unsafe characters become `_`.
pub fn scope_dir_name(scope: &Scope) -> String {
    let name: String = scope
        .key()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => c,
            _ => '_',
        })
        .collect();
    match name.trim_matches('.') {
        "" => "_".to_owned(),
        _ => name,
    }
}

/// Write a scope's blocks under `dir/<scope>/`, returning that directory.
pub fn write_blocks(dir: &Path, scope: &Scope, blocks: &OutputBlocks) -> Result<PathBuf> {
    let target = dir.join(scope_dir_name(scope));
    fs::create_dir_all(&target)
        .with_context(|| format!("Failed to create `{}`", target.display()))?;

    let contents = [&blocks.head, &blocks.body, &blocks.footer];
    for (file, content) in BLOCK_FILES.iter().zip(contents) {
        let path = target.join(file);
        fs::write(&path, content).with_context(|| format!("Failed to write `{}`", path.display()))?;
    }
    Ok(target)
}

/// Parse a command-line value: JSON when it parses, plain text otherwise.
pub fn parse_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}
