//! Breadcrumb hierarchy derived from page URLs.
//!
//! # Parent Rule
//!
//! A page's parent is the page whose URL equals its own URL with the last
//! `/`-delimited segment removed:
//!
//! ```text
//! /                    home (synthetic root, never a parent)
//! /shop/               parent: none (rootless)
//! /shop/widgets/       parent: /shop/
//! /blog/2025/post/     parent: /blog/2025/ if such a page exists, else none
//! ```
//!
//! URLs are compared after normalization: absolute URLs are reduced to their
//! path, query and fragment are dropped, and a trailing `/` is ignored. When
//! two pages share a URL the first one listed wins.

use crate::{
    schema::breadcrumb_list,
    settings::{Scope, SettingsRecord, fields},
    site::SiteIdentity,
    value::Fields,
};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

// ============================================================================
// Page Descriptors
// ============================================================================

/// Content kind of a page, as reported by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Home,
    #[default]
    Page,
    Post,
    /// Placeholder entry standing for the global scope.
    Global,
}

/// Page metadata supplied by the host environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDescriptor {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type", default)]
    pub kind: PageKind,
}

impl PageDescriptor {
    pub fn new(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>, kind: PageKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            kind,
        }
    }

    /// Root-relative path of this page's URL.
    pub fn path(&self) -> String {
        root_relative(&self.url)
    }

    /// Home and global placeholder pages never take part in parenting.
    fn is_parentable(&self) -> bool {
        !matches!(self.kind, PageKind::Home | PageKind::Global) && match_key(&self.url) != "/"
    }
}

/// Reduce a URL to its root-relative path, keeping a trailing `/`.
pub fn root_relative(url: &str) -> String {
    let url = url.trim();
    let without_origin = match url.find("://") {
        Some(scheme_end) => {
            let rest = &url[scheme_end + 3..];
            rest.find('/').map_or("/", |slash| &rest[slash..])
        }
        None => url,
    };
    let path = without_origin
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}

/// Comparison key: root-relative path without a trailing `/`.
fn match_key(url: &str) -> String {
    let path = root_relative(url);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Key of the parent URL, or `None` for top-level paths.
fn parent_key(key: &str) -> Option<String> {
    let (parent, _) = key.rsplit_once('/')?;
    (!parent.is_empty()).then(|| parent.to_owned())
}

// ============================================================================
// Hierarchy
// ============================================================================

/// Derived position of one page in the hierarchy. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub page: PageDescriptor,
    pub parent: Option<String>,
    /// Number of ancestors; rootless pages are at depth 0.
    pub depth: usize,
    pub children: Vec<String>,
}

/// Page id to node, with input order preserved for iteration.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    nodes: FxHashMap<String, Node>,
    order: Vec<String>,
}

impl Hierarchy {
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Nodes in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Ids of every page, in input order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Link every page to its parent in a single pass over a URL lookup.
pub fn build_hierarchy(pages: &[PageDescriptor]) -> Hierarchy {
    let mut by_url: FxHashMap<String, &str> = FxHashMap::default();
    for page in pages.iter().filter(|page| page.is_parentable()) {
        by_url.entry(match_key(&page.url)).or_insert(&page.id);
    }

    let mut hierarchy = Hierarchy::default();
    for page in pages {
        if hierarchy.nodes.contains_key(&page.id) {
            continue;
        }
        let parent = if page.is_parentable() {
            parent_key(&match_key(&page.url))
                .and_then(|key| by_url.get(&key))
                .map(|id| (*id).to_owned())
                .filter(|id| id != &page.id)
        } else {
            None
        };
        hierarchy.order.push(page.id.clone());
        hierarchy.nodes.insert(
            page.id.clone(),
            Node {
                page: page.clone(),
                parent,
                depth: 0,
                children: Vec::new(),
            },
        );
    }

    // children and depth, in input order
    let links: Vec<(String, String)> = hierarchy
        .iter()
        .filter_map(|node| Some((node.parent.clone()?, node.page.id.clone())))
        .collect();
    for (parent, child) in links {
        if let Some(node) = hierarchy.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }
    let depths: Vec<(String, usize)> = hierarchy
        .order
        .iter()
        .map(|id| (id.clone(), ancestors(&hierarchy, id).count()))
        .collect();
    for (id, depth) in depths {
        if let Some(node) = hierarchy.nodes.get_mut(&id) {
            node.depth = depth;
        }
    }

    hierarchy
}

/// Walk parent pointers upward, nearest first.
fn ancestors<'a>(hierarchy: &'a Hierarchy, id: &str) -> impl Iterator<Item = &'a Node> {
    let mut current = hierarchy.get(id).and_then(|node| node.parent.as_deref());
    let mut remaining = hierarchy.len();
    std::iter::from_fn(move || {
        // parent URLs are strictly shorter, the bound only guards corrupt input
        remaining = remaining.checked_sub(1)?;
        let node = hierarchy.get(current?)?;
        current = node.parent.as_deref();
        Some(node)
    })
}

// ============================================================================
// Paths
// ============================================================================

/// Per-render breadcrumb options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreadcrumbOptions {
    /// Label of the synthetic home crumb; the site name when `None`.
    pub home_label: Option<String>,
    /// Custom label per page id.
    pub labels: FxHashMap<String, String>,
    /// Page ids left out of every path.
    pub excluded: FxHashSet<String>,
}

impl BreadcrumbOptions {
    /// Read labels and exclusions from a settings snapshot.
    ///
    /// Page scopes contribute `breadcrumb_label` and `breadcrumb_exclude`;
    /// the global scope contributes `breadcrumb_home_label`.
    pub fn from_settings(settings: &SettingsRecord) -> Self {
        let home_label = settings
            .scope(&Scope::Global)
            .and_then(|record| Fields::from_map(record).text(fields::BREADCRUMB_HOME_LABEL));

        let mut options = Self {
            home_label,
            ..Self::default()
        };
        for (scope, record) in settings.page_scopes() {
            let f = Fields::from_map(record);
            if let Some(label) = f.text(fields::BREADCRUMB_LABEL) {
                options.labels.insert(scope.key().to_owned(), label);
            }
            if f.flag(fields::BREADCRUMB_EXCLUDE) {
                options.excluded.insert(scope.key().to_owned());
            }
        }
        options
    }

    fn label_for(&self, page: &PageDescriptor) -> String {
        if let Some(label) = self.labels.get(&page.id) {
            return label.clone();
        }
        let title = page.title.trim();
        if !title.is_empty() {
            return title.to_owned();
        }
        // untitled pages fall back to their last URL segment
        match_key(&page.url)
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or(&page.id)
            .to_owned()
    }
}

/// One step of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub name: String,
    pub url: String,
}

/// Root-to-leaf trail for `id`, always starting with the synthetic home crumb.
///
/// Unknown ids and home pages yield the home crumb alone. Excluded pages are
/// skipped wherever they appear.
pub fn path_for(
    id: &str,
    hierarchy: &Hierarchy,
    site: &SiteIdentity,
    options: &BreadcrumbOptions,
) -> Vec<Crumb> {
    let home = Crumb {
        name: options
            .home_label
            .clone()
            .unwrap_or_else(|| site.name.clone()),
        url: site.url_for("/"),
    };

    let Some(node) = hierarchy.get(id).filter(|node| node.page.is_parentable()) else {
        return vec![home];
    };

    let mut trail: Vec<&Node> = std::iter::once(node)
        .chain(ancestors(hierarchy, id))
        .filter(|node| !options.excluded.contains(&node.page.id))
        .collect();
    trail.reverse();

    std::iter::once(home)
        .chain(trail.into_iter().map(|node| Crumb {
            name: options.label_for(&node.page),
            url: site.url_for(&node.page.path()),
        }))
        .collect()
}

/// `BreadcrumbList` document for a trail; `None` below two crumbs.
pub fn breadcrumb_document(path: &[Crumb]) -> Option<Value> {
    if path.len() < 2 {
        return None;
    }
    breadcrumb_list(&json!({ "items": path }))
}
