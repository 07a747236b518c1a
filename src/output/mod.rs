//! Output Composer.
//!
//! Turns resolved values, built schema documents and a breadcrumb trail into
//! three text blocks, one per insertion point.
//!
//! # Head Order
//!
//! ```text
//! essential meta (charset, viewport)      always
//! basic meta                              ┐
//! Open Graph                              │
//! Twitter card                            │ each only when its
//! Facebook                                │ trigger fields are set
//! social-profile comments                 │
//! default-image comment                   │
//! tracking: GTM → GA4 → Ads → Pixel →     │
//!           Clarity → Hotjar              │
//! structured data (single doc or @graph)  │
//! breadcrumb structured data              │
//! custom head code                        ┘
//! ```
//!
//! Lines are joined with `\n`; skipped sections leave no blank line and no
//! block ends with a newline. Composing is pure: the same inputs always give
//! byte-identical output.

pub mod escape;
pub mod head;
pub mod tracking;

use crate::{
    breadcrumb::{Crumb, breadcrumb_document},
    resolve::EffectiveValues,
    schema::doc::SCHEMA_CONTEXT,
    settings::fields::{CUSTOM_BODY_CODE, CUSTOM_FOOTER_CODE, CUSTOM_HEAD_CODE},
    site::SiteIdentity,
    value::Fields,
};
use escape::script_json;
use serde::Serialize;
use serde_json::{Value, json};
use tracking::{Integration, ScriptPolicy};

pub use tracking::LoadingMode;

/// Default `<meta charset>` value.
pub const DEFAULT_CHARSET: &str = "UTF-8";
/// Default `<meta name="viewport">` content.
pub const DEFAULT_VIEWPORT: &str = "width=device-width, initial-scale=1";

/// The three composed blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputBlocks {
    /// Inside `<head>`.
    pub head: String,
    /// Right after `<body>` opens.
    pub body: String,
    /// Right before `</body>` closes.
    pub footer: String,
}

// ============================================================================
// Composer
// ============================================================================

/// Output Composer bound to one site.
#[derive(Debug, Clone)]
pub struct Composer {
    site: SiteIdentity,
    charset: String,
    viewport: String,
    pretty_json: bool,
    locale: Option<String>,
}

impl Composer {
    pub fn new(site: SiteIdentity) -> Self {
        Self {
            site,
            charset: DEFAULT_CHARSET.to_owned(),
            viewport: DEFAULT_VIEWPORT.to_owned(),
            pretty_json: false,
            locale: None,
        }
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    pub fn with_viewport(mut self, viewport: impl Into<String>) -> Self {
        self.viewport = viewport.into();
        self
    }

    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = pretty;
        self
    }

    /// Fallback `og:locale` used when no scope sets one.
    pub fn with_locale(mut self, locale: Option<String>) -> Self {
        self.locale = locale;
        self
    }

    pub fn site(&self) -> &SiteIdentity {
        &self.site
    }

    /// Compose all three blocks.
    ///
    /// `documents` are already-built schema documents in merge order;
    /// breadcrumb output needs at least two crumbs.
    pub fn compose(
        &self,
        values: &EffectiveValues,
        documents: &[Value],
        crumbs: &[Crumb],
        policy: &ScriptPolicy,
    ) -> OutputBlocks {
        let v = values.fields();
        OutputBlocks {
            head: self.head_block(&v, documents, crumbs, policy),
            body: body_block(&v),
            footer: v.text(CUSTOM_FOOTER_CODE).unwrap_or_default(),
        }
    }

    fn head_block(
        &self,
        v: &Fields<'_>,
        documents: &[Value],
        crumbs: &[Crumb],
        policy: &ScriptPolicy,
    ) -> String {
        let mut lines = head::essential(&self.charset, &self.viewport);
        lines.extend(head::basic(v));
        lines.extend(head::open_graph(v, &self.site, self.locale.as_deref()));
        lines.extend(head::twitter(v));
        lines.extend(head::facebook(v));
        lines.extend(head::social_profiles(v));
        lines.extend(head::default_image(v));

        for integration in Integration::ALL {
            if let Some(id) = v.text(integration.id_field()) {
                lines.extend(tracking::head_snippet(integration, &id, policy.mode(integration)));
            }
        }

        if let Some(document) = combine_documents(documents) {
            lines.push(self.json_ld(&document));
        }
        if let Some(document) = breadcrumb_document(crumbs) {
            lines.push(self.json_ld(&document));
        }
        if let Some(code) = v.text(CUSTOM_HEAD_CODE) {
            lines.push(code);
        }
        lines.join("\n")
    }

    fn json_ld(&self, document: &Value) -> String {
        format!(
            r#"<script type="application/ld+json">{}</script>"#,
            script_json(document, self.pretty_json)
        )
    }
}

fn body_block(v: &Fields<'_>) -> String {
    let mut lines: Vec<String> = [Integration::GoogleTagManager, Integration::MetaPixel]
        .into_iter()
        .filter_map(|integration| {
            let id = v.text(integration.id_field())?;
            tracking::body_snippet(integration, &id)
        })
        .collect();
    if let Some(code) = v.text(CUSTOM_BODY_CODE) {
        lines.push(code);
    }
    lines.join("\n")
}

/// Merge built documents into one.
///
/// Deeply equal documents are kept once. A single document is returned
/// as-is; several are wrapped in an `@graph` sharing the schema.org
/// `@context`. Nodes declaring any other context keep their own.
pub fn combine_documents(documents: &[Value]) -> Option<Value> {
    let mut unique: Vec<&Value> = Vec::with_capacity(documents.len());
    for document in documents {
        if !unique.contains(&document) {
            unique.push(document);
        }
    }
    match unique.as_slice() {
        [] => None,
        [single] => Some((*single).clone()),
        many => {
            let graph: Vec<Value> = many
                .iter()
                .map(|document| {
                    let mut node = (*document).clone();
                    // only the shared context is hoisted; foreign vocabularies stay put
                    if let Value::Object(map) = &mut node
                        && map.get("@context").and_then(Value::as_str) == Some(SCHEMA_CONTEXT)
                    {
                        map.shift_remove("@context");
                    }
                    node
                })
                .collect();
            Some(json!({ "@context": SCHEMA_CONTEXT, "@graph": graph }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        resolve::effective_values,
        settings::{Scope, SettingsRecord},
    };

    fn values(global: Value) -> EffectiveValues {
        let settings = SettingsRecord::from_value(json!({ "global": global }));
        effective_values(&settings, &Scope::Global)
    }

    fn composer() -> Composer {
        Composer::new(SiteIdentity::new(Some("Acme"), Some("https://acme.test")))
    }

    fn compose(global: Value) -> OutputBlocks {
        let values = values(global);
        let policy = ScriptPolicy::from_fields(&values.fields());
        composer().compose(&values, &[], &[], &policy)
    }

    #[test]
    fn test_nothing_set_is_essential_only() {
        let blocks = compose(json!({}));
        assert_eq!(
            blocks.head,
            "<meta charset=\"UTF-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"
        );
        assert_eq!(blocks.body, "");
        assert_eq!(blocks.footer, "");
    }

    #[test]
    fn test_only_og_title_adds_only_open_graph() {
        let blocks = compose(json!({ "og_title": "Hello" }));
        let lines: Vec<_> = blocks.head.lines().collect();
        assert!(lines[0].starts_with("<meta charset"));
        assert!(lines[1].starts_with("<meta name=\"viewport\""));
        assert!(lines[2..].iter().all(|line| line.starts_with("<meta property=\"og:")));
        assert!(lines.contains(&"<meta property=\"og:title\" content=\"Hello\">"));
        assert!(!blocks.head.contains("\n\n"));
        assert!(!blocks.head.ends_with('\n'));
    }

    #[test]
    fn test_section_order() {
        let blocks = compose(json!({
            "meta_title": "Title",
            "og_title": "OG",
            "twitter_card": "summary",
            "fb_app_id": "42",
            "social_profiles": { "twitter": "https://x.com/acme" },
            "default_image": "https://acme.test/d.png",
            "hotjar_id": "1",
            "gtm_id": "GTM-1",
            "custom_head_code": "<!-- custom -->"
        }));
        let head = &blocks.head;
        let position = |needle: &str| head.find(needle).unwrap();
        let order = [
            "<meta charset",
            "<title>",
            "og:title",
            "twitter:card",
            "fb:app_id",
            "Social profile",
            "Default share image",
            "<!-- Google Tag Manager -->",
            "<!-- Hotjar -->",
            "<!-- custom -->",
        ];
        for pair in order.windows(2) {
            assert!(position(pair[0]) < position(pair[1]), "{} before {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_tracking_modes_do_not_leak() {
        let blocks = compose(json!({
            "ga4_id": "G-1",
            "ga4_loading": "blocking",
            "clarity_id": "c1"
        }));
        assert!(blocks.head.contains(r#"<script src="https://www.googletagmanager.com/gtag/js?id=G-1"></script>"#));
        assert!(blocks.head.contains(r#"<script async src="https://www.clarity.ms/tag/c1"></script>"#));
    }

    #[test]
    fn test_body_and_footer_blocks() {
        let blocks = compose(json!({
            "gtm_id": "GTM-1",
            "meta_pixel_id": "99",
            "custom_body_code": "<div id=\"start\"></div>",
            "custom_footer_code": "<script>done()</script>"
        }));
        let body: Vec<_> = blocks.body.lines().collect();
        assert_eq!(body.len(), 3);
        assert!(body[0].contains("googletagmanager.com/ns.html?id=GTM-1"));
        assert!(body[1].contains("facebook.com/tr?id=99"));
        assert_eq!(body[2], "<div id=\"start\"></div>");
        assert_eq!(blocks.footer, "<script>done()</script>");
    }

    #[test]
    fn test_structured_data_single_and_graph() {
        let values = values(json!({}));
        let policy = ScriptPolicy::default();
        let org = json!({ "@context": "https://schema.org", "@type": "Organization", "name": "Acme" });
        let site = json!({ "@context": "https://schema.org", "@type": "WebSite", "name": "Acme", "url": "https://acme.test" });

        let blocks = composer().compose(&values, &[org.clone()], &[], &policy);
        assert!(blocks.head.contains(r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"Organization","name":"Acme"}</script>"#));

        let blocks = composer().compose(&values, &[org.clone(), site, org], &[], &policy);
        assert_eq!(blocks.head.matches("application/ld+json").count(), 1);
        assert!(blocks.head.contains(r#"{"@context":"https://schema.org","@graph":[{"@type":"Organization""#));
    }

    #[test]
    fn test_breadcrumbs_get_their_own_block() {
        let values = values(json!({}));
        let crumbs = vec![
            Crumb { name: "Acme".into(), url: "https://acme.test/".into() },
            Crumb { name: "Shop".into(), url: "https://acme.test/shop/".into() },
        ];
        let org = json!({ "@context": "https://schema.org", "@type": "Organization", "name": "Acme" });
        let blocks = composer().compose(&values, &[org], &crumbs, &ScriptPolicy::default());
        assert_eq!(blocks.head.matches("application/ld+json").count(), 2);
        let last = blocks.head.lines().last().unwrap();
        assert!(last.contains("BreadcrumbList"));

        // a single crumb is not a trail
        let blocks = composer().compose(&values, &[], &crumbs[..1], &ScriptPolicy::default());
        assert!(!blocks.head.contains("BreadcrumbList"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let global = json!({ "meta_title": "T", "og_title": "O", "ga4_id": "G-1" });
        assert_eq!(compose(global.clone()), compose(global));
    }

    #[test]
    fn test_custom_config() {
        let values = values(json!({}));
        let blocks = composer()
            .with_charset("")
            .with_viewport("width=1024")
            .compose(&values, &[], &[], &ScriptPolicy::default());
        assert_eq!(blocks.head, r#"<meta name="viewport" content="width=1024">"#);
    }

    #[test]
    fn test_locale_fallback_only_inside_open_graph() {
        let composer = composer().with_locale(Some("en_US".into()));
        let blocks = composer.compose(&values(json!({})), &[], &[], &ScriptPolicy::default());
        assert!(!blocks.head.contains("og:locale"));

        let blocks = composer.compose(&values(json!({ "og_title": "T" })), &[], &[], &ScriptPolicy::default());
        assert!(blocks.head.contains(r#"<meta property="og:locale" content="en_US">"#));

        let global = json!({ "og_title": "T", "og_locale": "fr_FR" });
        let blocks = composer.compose(&values(global), &[], &[], &ScriptPolicy::default());
        assert!(blocks.head.contains(r#"content="fr_FR""#));
        assert!(!blocks.head.contains("en_US"));
    }

    #[test]
    fn test_combine_documents() {
        assert_eq!(combine_documents(&[]), None);
        let a = json!({ "@context": "https://schema.org", "@type": "A" });
        let b = json!({ "@context": "https://schema.org", "@type": "B" });
        assert_eq!(combine_documents(&[a.clone(), a.clone()]), Some(a.clone()));
        assert_eq!(
            combine_documents(&[a, b]),
            Some(json!({ "@context": "https://schema.org", "@graph": [{ "@type": "A" }, { "@type": "B" }] }))
        );
    }

    #[test]
    fn test_combine_keeps_foreign_context() {
        let org = json!({ "@context": "https://schema.org", "@type": "Organization", "name": "Acme" });
        let widget = json!({ "@context": "https://example.org/vocab", "@type": "Widget", "name": "W" });
        assert_eq!(
            combine_documents(&[org, widget]),
            Some(json!({
                "@context": "https://schema.org",
                "@graph": [
                    { "@type": "Organization", "name": "Acme" },
                    { "@context": "https://example.org/vocab", "@type": "Widget", "name": "W" }
                ]
            }))
        );
    }
}
