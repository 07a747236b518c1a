//! Schema type registry and builder protocol.
//!
//! Every schema type maps to a [`Descriptor`]: a label, a cardinality rule,
//! and a pure builder turning saved form data into a schema.org JSON-LD
//! document. Builders are total: malformed or incomplete data yields `None`
//! ("not ready to publish"), never a panic or an error.
//!
//! # Registry
//!
//! | Type                  | Multiple | `@type` emitted            |
//! |-----------------------|----------|----------------------------|
//! | Organization          | no       | `Organization`             |
//! | LocalBusiness         | no       | `LocalBusiness` or subtype |
//! | NonProfitOrganization | no       | `NGO`                      |
//! | OnlineMarketplace     | no       | `OnlineStore`              |
//! | Person                | yes      | `Person`                   |
//! | Article               | yes      | `Article` or subtype       |
//! | Product               | yes      | `Product`                  |
//! | Service               | yes      | `Service`                  |
//! | Event                 | yes      | `Event` or subtype         |
//! | Recipe                | yes      | `Recipe`                   |
//! | VideoObject           | yes      | `VideoObject`              |
//! | HowTo                 | yes      | `HowTo`                    |
//! | FAQPage               | no       | `FAQPage`                  |
//! | Review                | yes      | `Review`                   |
//! | Course                | yes      | `Course`                   |
//! | JobPosting            | yes      | `JobPosting`               |
//! | WebPage               | no       | `WebPage` or subtype       |
//! | WebSite               | no       | `WebSite`                  |
//! | BreadcrumbList        | no       | `BreadcrumbList`           |
//! | Custom                | yes      | user supplied              |

mod builders;
pub mod doc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::BTreeMap, fmt, str::FromStr, sync::LazyLock};
use thiserror::Error;

pub use builders::breadcrumb_list;

/// Pure builder: form data in, document or "not ready" out.
pub type Builder = fn(&Value) -> Option<Value>;

// ============================================================================
// Schema Types
// ============================================================================

/// Built-in schema types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchemaType {
    Organization,
    LocalBusiness,
    NonProfitOrganization,
    OnlineMarketplace,
    Person,
    Article,
    Product,
    Service,
    Event,
    Recipe,
    VideoObject,
    HowTo,
    FaqPage,
    Review,
    Course,
    JobPosting,
    WebPage,
    WebSite,
    BreadcrumbList,
    Custom,
}

impl SchemaType {
    pub const ALL: [Self; 20] = [
        Self::Organization,
        Self::LocalBusiness,
        Self::NonProfitOrganization,
        Self::OnlineMarketplace,
        Self::Person,
        Self::Article,
        Self::Product,
        Self::Service,
        Self::Event,
        Self::Recipe,
        Self::VideoObject,
        Self::HowTo,
        Self::FaqPage,
        Self::Review,
        Self::Course,
        Self::JobPosting,
        Self::WebPage,
        Self::WebSite,
        Self::BreadcrumbList,
        Self::Custom,
    ];

    /// Registry key, as stored in `SchemaEntry::type`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Organization => "Organization",
            Self::LocalBusiness => "LocalBusiness",
            Self::NonProfitOrganization => "NonProfitOrganization",
            Self::OnlineMarketplace => "OnlineMarketplace",
            Self::Person => "Person",
            Self::Article => "Article",
            Self::Product => "Product",
            Self::Service => "Service",
            Self::Event => "Event",
            Self::Recipe => "Recipe",
            Self::VideoObject => "VideoObject",
            Self::HowTo => "HowTo",
            Self::FaqPage => "FAQPage",
            Self::Review => "Review",
            Self::Course => "Course",
            Self::JobPosting => "JobPosting",
            Self::WebPage => "WebPage",
            Self::WebSite => "WebSite",
            Self::BreadcrumbList => "BreadcrumbList",
            Self::Custom => "Custom",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Organization => "Organization",
            Self::LocalBusiness => "Local Business",
            Self::NonProfitOrganization => "Non-profit Organization",
            Self::OnlineMarketplace => "Online Marketplace",
            Self::Person => "Person",
            Self::Article => "Article",
            Self::Product => "Product",
            Self::Service => "Service",
            Self::Event => "Event",
            Self::Recipe => "Recipe",
            Self::VideoObject => "Video",
            Self::HowTo => "How-To",
            Self::FaqPage => "FAQ Page",
            Self::Review => "Review",
            Self::Course => "Course",
            Self::JobPosting => "Job Posting",
            Self::WebPage => "Web Page",
            Self::WebSite => "Website",
            Self::BreadcrumbList => "Breadcrumb List",
            Self::Custom => "Custom JSON-LD",
        }
    }

    /// Whether a scope may hold more than one entry of this type.
    pub const fn allow_multiple(self) -> bool {
        !matches!(
            self,
            Self::Organization
                | Self::LocalBusiness
                | Self::NonProfitOrganization
                | Self::OnlineMarketplace
                | Self::FaqPage
                | Self::WebPage
                | Self::WebSite
                | Self::BreadcrumbList
        )
    }

    pub const fn builder(self) -> Builder {
        match self {
            Self::Organization => builders::organization,
            Self::LocalBusiness => builders::local_business,
            Self::NonProfitOrganization => builders::non_profit,
            Self::OnlineMarketplace => builders::online_marketplace,
            Self::Person => builders::person,
            Self::Article => builders::article,
            Self::Product => builders::product,
            Self::Service => builders::service,
            Self::Event => builders::event,
            Self::Recipe => builders::recipe,
            Self::VideoObject => builders::video_object,
            Self::HowTo => builders::how_to,
            Self::FaqPage => builders::faq_page,
            Self::Review => builders::review,
            Self::Course => builders::course,
            Self::JobPosting => builders::job_posting,
            Self::WebPage => builders::web_page,
            Self::WebSite => builders::web_site,
            Self::BreadcrumbList => builders::breadcrumb_list,
            Self::Custom => builders::custom,
        }
    }

    pub const fn descriptor(self) -> Descriptor {
        Descriptor {
            label: self.label(),
            builder: self.builder(),
            allow_multiple: self.allow_multiple(),
        }
    }

    /// Build a document from form data.
    pub fn build(self, data: &Value) -> Option<Value> {
        (self.builder())(data)
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchemaType {
    type Err = SchemaError;

    /// Case-insensitive; `FaqPage` is accepted as an alias of `FAQPage`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s) || format!("{kind:?}").eq_ignore_ascii_case(s))
            .ok_or_else(|| SchemaError::UnknownType(s.to_owned()))
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Registry entry for one schema type.
#[derive(Debug, Clone, Copy)]
pub struct Descriptor {
    pub label: &'static str,
    pub builder: Builder,
    pub allow_multiple: bool,
}

/// All built-in types keyed by registry name.
pub static REGISTRY: LazyLock<BTreeMap<&'static str, Descriptor>> = LazyLock::new(|| {
    SchemaType::ALL
        .into_iter()
        .map(|kind| (kind.name(), kind.descriptor()))
        .collect()
});

/// Look up a descriptor by type name (case-insensitive).
pub fn lookup(name: &str) -> Option<Descriptor> {
    name.parse::<SchemaType>().ok().map(SchemaType::descriptor)
}

// ============================================================================
// Entries
// ============================================================================

/// A saved schema entry of one scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaEntry {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "type")]
    pub schema_type: String,

    #[serde(default)]
    pub data: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Value>,
}

impl SchemaEntry {
    pub fn new(id: impl Into<String>, kind: SchemaType, data: Value) -> Self {
        Self {
            id: id.into(),
            schema_type: kind.name().to_owned(),
            data,
            created_at: None,
            updated_at: None,
        }
    }

    /// Registry type, if the stored name is known.
    pub fn kind(&self) -> Option<SchemaType> {
        self.schema_type.parse().ok()
    }

    /// Build this entry's document. Unknown types build to `None`.
    pub fn build(&self) -> Option<Value> {
        self.kind()?.build(&self.data)
    }
}

/// Decode entries leniently: non-arrays are empty, bad elements are skipped.
pub fn entries_from_value(value: &Value) -> Vec<SchemaEntry> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        _ => Vec::new(),
    }
}

// ============================================================================
// Cardinality
// ============================================================================

/// Schema-related errors surfaced to callers on the creation path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("unknown schema type `{0}`")]
    UnknownType(String),

    #[error(transparent)]
    Cardinality(#[from] CardinalityViolation),
}

/// A singleton type appearing more than once in one scope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} allows a single entry per scope, found {count}")]
pub struct CardinalityViolation {
    pub kind: SchemaType,
    pub count: usize,
}

/// Number of entries of type `name` (case-insensitive, aliases resolved).
pub fn count_of_type(entries: &[SchemaEntry], name: &str) -> usize {
    match name.parse::<SchemaType>() {
        Ok(kind) => entries.iter().filter(|entry| entry.kind() == Some(kind)).count(),
        Err(_) => entries
            .iter()
            .filter(|entry| entry.schema_type.eq_ignore_ascii_case(name.trim()))
            .count(),
    }
}

/// Every singleton type that appears more than once, in registry order.
pub fn check_cardinality(entries: &[SchemaEntry]) -> Vec<CardinalityViolation> {
    SchemaType::ALL
        .into_iter()
        .filter(|kind| !kind.allow_multiple())
        .filter_map(|kind| {
            let count = count_of_type(entries, kind.name());
            (count > 1).then_some(CardinalityViolation { kind, count })
        })
        .collect()
}

/// Precondition for adding one more entry of `kind` to `entries`.
pub fn ensure_can_add(entries: &[SchemaEntry], kind: SchemaType) -> Result<(), SchemaError> {
    let count = count_of_type(entries, kind.name());
    if !kind.allow_multiple() && count >= 1 {
        return Err(CardinalityViolation {
            kind,
            count: count + 1,
        }
        .into());
    }
    Ok(())
}

// ============================================================================
// Inheritance
// ============================================================================

/// Entries that apply to a page: inherited global entries first, then local.
///
/// A global entry is shadowed when a local entry has the same id, or when its
/// type is a singleton that the page already defines.
pub fn merge_entries(global: &[SchemaEntry], local: &[SchemaEntry], inherit: bool) -> Vec<SchemaEntry> {
    let inherited = global.iter().filter(|entry| {
        inherit
            && !local.iter().any(|own| {
                (!entry.id.is_empty() && own.id == entry.id)
                    || entry
                        .kind()
                        .is_some_and(|kind| !kind.allow_multiple() && own.kind() == Some(kind))
            })
    });
    inherited.chain(local).cloned().collect()
}

/// Build every entry; entries that are not ready to publish are returned
/// separately so callers can report them.
pub fn build_documents(entries: &[SchemaEntry]) -> (Vec<Value>, Vec<&SchemaEntry>) {
    let mut documents = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();
    for entry in entries {
        match entry.build() {
            Some(document) => documents.push(document),
            None => skipped.push(entry),
        }
    }
    (documents, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_entries_shadowing() {
        let global = vec![
            SchemaEntry::new("org", SchemaType::Organization, json!({ "name": "Global" })),
            SchemaEntry::new("site", SchemaType::WebSite, json!({})),
            SchemaEntry::new("a1", SchemaType::Article, json!({})),
            SchemaEntry::new("shared", SchemaType::Product, json!({ "name": "Old" })),
        ];
        let local = vec![
            SchemaEntry::new("org-local", SchemaType::Organization, json!({ "name": "Local" })),
            SchemaEntry::new("shared", SchemaType::Product, json!({ "name": "New" })),
            SchemaEntry::new("a2", SchemaType::Article, json!({})),
        ];
        let merged = merge_entries(&global, &local, true);
        let ids: Vec<_> = merged.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["site", "a1", "org-local", "shared", "a2"]);
        assert_eq!(merged[3].data["name"], json!("New"));

        let own_only = merge_entries(&global, &local, false);
        assert_eq!(own_only, local);
    }

    #[test]
    fn test_build_documents_reports_skipped() {
        let entries = vec![
            SchemaEntry::new("ok", SchemaType::Organization, json!({ "name": "Acme" })),
            SchemaEntry::new("draft", SchemaType::Article, json!({ "headline": "Draft" })),
        ];
        let (documents, skipped) = build_documents(&entries);
        assert_eq!(documents.len(), 1);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].id, "draft");
    }

    #[test]
    fn test_registry_has_every_type() {
        assert_eq!(REGISTRY.len(), SchemaType::ALL.len());
        assert!(REGISTRY.len() >= 18);
        for kind in SchemaType::ALL {
            let descriptor = REGISTRY.get(kind.name()).unwrap();
            assert_eq!(descriptor.label, kind.label());
            assert_eq!(descriptor.allow_multiple, kind.allow_multiple());
        }
    }

    #[test]
    fn test_every_builder_rejects_empty_record() {
        for kind in SchemaType::ALL {
            assert_eq!(kind.build(&json!({})), None, "{kind} built from empty data");
            assert_eq!(kind.build(&Value::Null), None, "{kind} built from null");
            assert_eq!(kind.build(&json!("text")), None, "{kind} built from a string");
            assert_eq!(kind.build(&json!([1, 2])), None, "{kind} built from an array");
        }
    }

    #[test]
    fn test_builders_survive_wrong_shapes() {
        let garbage = json!({
            "name": ["not", "a", "string"],
            "headline": { "nested": true },
            "url": 12,
            "questions": "nope",
            "steps": 7,
            "items": { "a": 1 },
            "offers": "free",
            "authors": 3,
            "address": "Main St",
            "json": "{broken"
        });
        for kind in SchemaType::ALL {
            // must not panic; result shape is type specific
            let _ = kind.build(&garbage);
        }
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("FAQPage".parse::<SchemaType>(), Ok(SchemaType::FaqPage));
        assert_eq!("FaqPage".parse::<SchemaType>(), Ok(SchemaType::FaqPage));
        assert_eq!("organization".parse::<SchemaType>(), Ok(SchemaType::Organization));
        assert_eq!(
            "Spaceship".parse::<SchemaType>(),
            Err(SchemaError::UnknownType("Spaceship".into()))
        );
    }

    #[test]
    fn test_lookup() {
        assert!(lookup("Article").is_some_and(|d| d.allow_multiple));
        assert!(lookup("website").is_some_and(|d| !d.allow_multiple));
        assert!(lookup("Nope").is_none());
    }

    #[test]
    fn test_entry_serde_shape() {
        let entry: SchemaEntry = serde_json::from_value(json!({
            "id": "e1",
            "type": "Product",
            "data": { "name": "Widget" },
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": 1735689600
        }))
        .unwrap();
        assert_eq!(entry.kind(), Some(SchemaType::Product));
        assert_eq!(entry.created_at, Some(json!("2025-01-01T00:00:00Z")));
        assert!(entry.build().is_some());

        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back["type"], json!("Product"));
        assert_eq!(back["updatedAt"], json!(1735689600));
    }

    #[test]
    fn test_unknown_entry_type_builds_to_none() {
        let entry = SchemaEntry {
            id: "x".into(),
            schema_type: "Spaceship".into(),
            data: json!({ "name": "Enterprise" }),
            created_at: None,
            updated_at: None,
        };
        assert_eq!(entry.kind(), None);
        assert_eq!(entry.build(), None);
    }

    #[test]
    fn test_count_of_type_detects_seeded_duplicates() {
        let entries = vec![
            SchemaEntry::new("a", SchemaType::Organization, json!({ "name": "A" })),
            SchemaEntry::new("b", SchemaType::Organization, json!({ "name": "B" })),
            SchemaEntry::new("c", SchemaType::Article, json!({})),
        ];
        assert_eq!(count_of_type(&entries, "Organization"), 2);
        assert_eq!(count_of_type(&entries, "Article"), 1);
        assert_eq!(count_of_type(&entries, "Event"), 0);
        assert_eq!(count_of_type(&entries, "Spaceship"), 0);

        let violations = check_cardinality(&entries);
        assert_eq!(
            violations,
            vec![CardinalityViolation { kind: SchemaType::Organization, count: 2 }]
        );
        assert_eq!(
            violations[0].to_string(),
            "Organization allows a single entry per scope, found 2"
        );
    }

    #[test]
    fn test_creation_path_keeps_singletons_single() {
        let mut entries = Vec::new();
        for (i, kind) in [SchemaType::Organization, SchemaType::Organization, SchemaType::Article, SchemaType::Article]
            .into_iter()
            .enumerate()
        {
            if ensure_can_add(&entries, kind).is_ok() {
                entries.push(SchemaEntry::new(format!("e{i}"), kind, json!({})));
            }
        }
        assert_eq!(count_of_type(&entries, "Organization"), 1);
        assert_eq!(count_of_type(&entries, "Article"), 2);
        assert!(check_cardinality(&entries).is_empty());
    }

    #[test]
    fn test_ensure_can_add_error() {
        let entries = vec![SchemaEntry::new("w", SchemaType::WebSite, json!({}))];
        let err = ensure_can_add(&entries, SchemaType::WebSite).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::Cardinality(CardinalityViolation { kind: SchemaType::WebSite, count: 2 })
        ));
    }
}
