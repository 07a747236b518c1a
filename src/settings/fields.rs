//! Static catalog of known field keys.
//!
//! The catalog fixes, for every key the engine understands, the kind of value
//! it holds (which decides its empty default) and whether a page scope may
//! override it. Catalog order is also the order `effective_values` and the
//! `status` command report fields in.

use serde_json::{Map, Value};

// ============================================================================
// Field Keys
// ============================================================================

pub const META_TITLE: &str = "meta_title";
pub const META_DESCRIPTION: &str = "meta_description";
pub const META_KEYWORDS: &str = "meta_keywords";
pub const META_AUTHOR: &str = "meta_author";
pub const META_ROBOTS: &str = "meta_robots";
pub const CANONICAL_URL: &str = "canonical_url";
pub const THEME_COLOR: &str = "theme_color";
pub const GOOGLE_VERIFICATION: &str = "google_verification";
pub const BING_VERIFICATION: &str = "bing_verification";
pub const YANDEX_VERIFICATION: &str = "yandex_verification";
pub const PINTEREST_VERIFICATION: &str = "pinterest_verification";

pub const OG_TITLE: &str = "og_title";
pub const OG_DESCRIPTION: &str = "og_description";
pub const OG_IMAGE: &str = "og_image";
pub const OG_URL: &str = "og_url";
pub const OG_TYPE: &str = "og_type";
pub const OG_SITE_NAME: &str = "og_site_name";
pub const OG_LOCALE: &str = "og_locale";

pub const TWITTER_CARD: &str = "twitter_card";
pub const TWITTER_TITLE: &str = "twitter_title";
pub const TWITTER_DESCRIPTION: &str = "twitter_description";
pub const TWITTER_IMAGE: &str = "twitter_image";
pub const TWITTER_SITE: &str = "twitter_site";
pub const TWITTER_CREATOR: &str = "twitter_creator";

pub const FB_APP_ID: &str = "fb_app_id";
pub const FB_ADMINS: &str = "fb_admins";
pub const ARTICLE_PUBLISHER: &str = "article_publisher";
pub const ARTICLE_AUTHOR: &str = "article_author";

pub const SOCIAL_PROFILES: &str = "social_profiles";
pub const DEFAULT_IMAGE: &str = "default_image";

pub const GTM_ID: &str = "gtm_id";
pub const GTM_LOADING: &str = "gtm_loading";
pub const GA4_ID: &str = "ga4_id";
pub const GA4_LOADING: &str = "ga4_loading";
pub const GOOGLE_ADS_ID: &str = "google_ads_id";
pub const GOOGLE_ADS_LOADING: &str = "google_ads_loading";
pub const META_PIXEL_ID: &str = "meta_pixel_id";
pub const META_PIXEL_LOADING: &str = "meta_pixel_loading";
pub const CLARITY_ID: &str = "clarity_id";
pub const CLARITY_LOADING: &str = "clarity_loading";
pub const HOTJAR_ID: &str = "hotjar_id";
pub const HOTJAR_LOADING: &str = "hotjar_loading";

pub const CUSTOM_HEAD_CODE: &str = "custom_head_code";
pub const CUSTOM_BODY_CODE: &str = "custom_body_code";
pub const CUSTOM_FOOTER_CODE: &str = "custom_footer_code";

pub const BREADCRUMBS_ENABLED: &str = "breadcrumbs_enabled";
pub const BREADCRUMB_LABEL: &str = "breadcrumb_label";
pub const BREADCRUMB_EXCLUDE: &str = "breadcrumb_exclude";
pub const BREADCRUMB_HOME_LABEL: &str = "breadcrumb_home_label";

pub const SCHEMA_INHERIT_GLOBAL: &str = "schema_inherit_global";

/// Reserved key holding a scope's schema entries. Never resolved as a field.
pub const SCHEMA_ENTRIES: &str = "schema_entries";

// ============================================================================
// Catalog
// ============================================================================

/// Shape of a field's value, which decides its empty default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    List,
    Record,
    Flag,
    /// Flag that counts as on until some scope turns it off.
    FlagOn,
}

impl FieldKind {
    /// Type-appropriate empty default.
    pub fn empty_value(self) -> Value {
        match self {
            Self::Text => Value::String(String::new()),
            Self::List => Value::Array(Vec::new()),
            Self::Record => Value::Object(Map::new()),
            Self::Flag => Value::Bool(false),
            Self::FlagOn => Value::Bool(true),
        }
    }
}

/// Catalog entry for one field key.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Only the global scope may set this field.
    pub global_only: bool,
}

const fn def(
    key: &'static str,
    label: &'static str,
    kind: FieldKind,
    global_only: bool,
) -> FieldDef {
    FieldDef {
        key,
        label,
        kind,
        global_only,
    }
}

const fn text(key: &'static str, label: &'static str) -> FieldDef {
    def(key, label, FieldKind::Text, false)
}

const fn global(key: &'static str, label: &'static str) -> FieldDef {
    def(key, label, FieldKind::Text, true)
}

const fn flag(key: &'static str, label: &'static str) -> FieldDef {
    def(key, label, FieldKind::Flag, false)
}

const fn flag_on(key: &'static str, label: &'static str) -> FieldDef {
    def(key, label, FieldKind::FlagOn, false)
}

pub static FIELDS: &[FieldDef] = &[
    text(META_TITLE, "Meta title"),
    text(META_DESCRIPTION, "Meta description"),
    text(META_KEYWORDS, "Meta keywords"),
    text(META_AUTHOR, "Author"),
    text(META_ROBOTS, "Robots directives"),
    text(CANONICAL_URL, "Canonical URL"),
    text(THEME_COLOR, "Theme color"),
    global(GOOGLE_VERIFICATION, "Google site verification"),
    global(BING_VERIFICATION, "Bing site verification"),
    global(YANDEX_VERIFICATION, "Yandex site verification"),
    global(PINTEREST_VERIFICATION, "Pinterest site verification"),
    text(OG_TITLE, "Open Graph title"),
    text(OG_DESCRIPTION, "Open Graph description"),
    text(OG_IMAGE, "Open Graph image"),
    text(OG_URL, "Open Graph URL"),
    text(OG_TYPE, "Open Graph type"),
    text(OG_SITE_NAME, "Open Graph site name"),
    text(OG_LOCALE, "Open Graph locale"),
    text(TWITTER_CARD, "Twitter card type"),
    text(TWITTER_TITLE, "Twitter title"),
    text(TWITTER_DESCRIPTION, "Twitter description"),
    text(TWITTER_IMAGE, "Twitter image"),
    global(TWITTER_SITE, "Twitter site handle"),
    text(TWITTER_CREATOR, "Twitter creator handle"),
    global(FB_APP_ID, "Facebook app ID"),
    def(FB_ADMINS, "Facebook admins", FieldKind::List, true),
    global(ARTICLE_PUBLISHER, "Article publisher"),
    text(ARTICLE_AUTHOR, "Article author"),
    def(SOCIAL_PROFILES, "Social profiles", FieldKind::Record, true),
    global(DEFAULT_IMAGE, "Default share image"),
    global(GTM_ID, "Google Tag Manager container"),
    global(GTM_LOADING, "Google Tag Manager loading"),
    global(GA4_ID, "Google Analytics 4 measurement ID"),
    global(GA4_LOADING, "Google Analytics 4 loading"),
    global(GOOGLE_ADS_ID, "Google Ads conversion ID"),
    global(GOOGLE_ADS_LOADING, "Google Ads loading"),
    global(META_PIXEL_ID, "Meta Pixel ID"),
    global(META_PIXEL_LOADING, "Meta Pixel loading"),
    global(CLARITY_ID, "Microsoft Clarity project"),
    global(CLARITY_LOADING, "Microsoft Clarity loading"),
    global(HOTJAR_ID, "Hotjar site ID"),
    global(HOTJAR_LOADING, "Hotjar loading"),
    text(CUSTOM_HEAD_CODE, "Custom head code"),
    text(CUSTOM_BODY_CODE, "Custom body code"),
    text(CUSTOM_FOOTER_CODE, "Custom footer code"),
    flag_on(BREADCRUMBS_ENABLED, "Breadcrumbs enabled"),
    text(BREADCRUMB_LABEL, "Breadcrumb label"),
    flag(BREADCRUMB_EXCLUDE, "Hide from breadcrumbs"),
    global(BREADCRUMB_HOME_LABEL, "Breadcrumb home label"),
    flag_on(SCHEMA_INHERIT_GLOBAL, "Inherit global schema"),
];

/// Look up a catalog entry.
pub fn field(key: &str) -> Option<&'static FieldDef> {
    FIELDS.iter().find(|def| def.key == key)
}

/// Kind of a field; unknown keys are treated as text.
pub fn kind_of(key: &str) -> FieldKind {
    field(key).map_or(FieldKind::Text, |def| def.kind)
}

/// Whether only the global scope may set `key`.
pub fn is_global_only(key: &str) -> bool {
    field(key).is_some_and(|def| def.global_only)
}

/// Fields a page scope may override, in catalog order.
pub fn page_fields() -> impl Iterator<Item = &'static FieldDef> {
    FIELDS.iter().filter(|def| !def.global_only)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_catalog_keys_are_unique() {
        let mut seen = FxHashSet::default();
        for def in FIELDS {
            assert!(seen.insert(def.key), "duplicate field key: {}", def.key);
        }
    }

    #[test]
    fn test_schema_entries_is_not_a_field() {
        assert!(field(SCHEMA_ENTRIES).is_none());
    }

    #[test]
    fn test_empty_defaults_by_kind() {
        assert_eq!(kind_of(META_TITLE).empty_value(), Value::String(String::new()));
        assert_eq!(kind_of(FB_ADMINS).empty_value(), Value::Array(Vec::new()));
        assert_eq!(kind_of(SOCIAL_PROFILES).empty_value(), Value::Object(Map::new()));
        assert_eq!(kind_of(BREADCRUMB_EXCLUDE).empty_value(), Value::Bool(false));
        assert_eq!(kind_of("not_in_catalog"), FieldKind::Text);
    }

    #[test]
    fn test_default_on_flags() {
        for key in [BREADCRUMBS_ENABLED, SCHEMA_INHERIT_GLOBAL] {
            assert_eq!(kind_of(key), FieldKind::FlagOn);
            assert_eq!(kind_of(key).empty_value(), Value::Bool(true));
        }
    }

    #[test]
    fn test_page_fields_skip_global_only() {
        assert!(page_fields().all(|def| !def.global_only));
        assert!(page_fields().any(|def| def.key == OG_TITLE));
        assert!(!page_fields().any(|def| def.key == GA4_ID));
        assert!(is_global_only(GTM_ID));
        assert!(!is_global_only(META_TITLE));
        assert!(!is_global_only("unknown"));
    }
}
