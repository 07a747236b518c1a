//! Head sections, one function per section.
//!
//! Each function returns the lines of its section, or nothing when the
//! section's triggering fields are all empty.
//!
//! | Section         | Triggered by                                        |
//! |-----------------|-----------------------------------------------------|
//! | essential       | always                                              |
//! | basic           | title, description, keywords, robots, verification  |
//! | Open Graph      | `og_title/description/image/url/type`               |
//! | Twitter         | any `twitter_*` field                               |
//! | Facebook        | `fb_app_id`, `fb_admins`, `article_*`               |
//! | social profiles | `social_profiles`                                   |
//! | default image   | `default_image`                                     |

use super::escape::{comment_text, html_escape};
use crate::{settings::fields::*, site::SiteIdentity, value::Fields};

fn meta_name(name: &str, content: &str) -> String {
    format!(r#"<meta name="{name}" content="{}">"#, html_escape(content))
}

fn meta_property(property: &str, content: &str) -> String {
    format!(r#"<meta property="{property}" content="{}">"#, html_escape(content))
}

/// First non-empty text among `keys`.
fn first_text(values: &Fields<'_>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| values.text(key))
}

fn any_text(values: &Fields<'_>, keys: &[&str]) -> bool {
    keys.iter().any(|key| values.text(key).is_some())
}

pub fn essential(charset: &str, viewport: &str) -> Vec<String> {
    let mut lines = Vec::new();
    if !charset.trim().is_empty() {
        lines.push(format!(r#"<meta charset="{}">"#, html_escape(charset.trim())));
    }
    if !viewport.trim().is_empty() {
        lines.push(meta_name("viewport", viewport.trim()));
    }
    lines
}

pub fn basic(values: &Fields<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(title) = values.text(META_TITLE) {
        lines.push(format!("<title>{}</title>", html_escape(&title)));
    }
    if let Some(description) = values.text(META_DESCRIPTION) {
        lines.push(meta_name("description", &description));
    }
    let keywords = values.strings(META_KEYWORDS);
    if !keywords.is_empty() {
        lines.push(meta_name("keywords", &keywords.join(", ")));
    }
    if let Some(author) = values.text(META_AUTHOR) {
        lines.push(meta_name("author", &author));
    }
    if let Some(robots) = values.text(META_ROBOTS) {
        lines.push(meta_name("robots", &robots));
    }
    if let Some(canonical) = values.text(CANONICAL_URL) {
        lines.push(format!(r#"<link rel="canonical" href="{}">"#, html_escape(&canonical)));
    }
    if let Some(color) = values.text(THEME_COLOR) {
        lines.push(meta_name("theme-color", &color));
    }

    const VERIFICATION: [(&str, &str); 4] = [
        (GOOGLE_VERIFICATION, "google-site-verification"),
        (BING_VERIFICATION, "msvalidate.01"),
        (YANDEX_VERIFICATION, "yandex-verification"),
        (PINTEREST_VERIFICATION, "p:domain_verify"),
    ];
    for (key, name) in VERIFICATION {
        if let Some(code) = values.text(key) {
            lines.push(meta_name(name, &code));
        }
    }
    lines
}

/// `locale` is the configured fallback for `og:locale`.
pub fn open_graph(values: &Fields<'_>, site: &SiteIdentity, locale: Option<&str>) -> Vec<String> {
    if !any_text(values, &[OG_TITLE, OG_DESCRIPTION, OG_IMAGE, OG_URL, OG_TYPE]) {
        return Vec::new();
    }
    let site_name = values
        .text(OG_SITE_NAME)
        .or_else(|| site.has_name().then(|| site.name.clone()));

    let properties = [
        ("og:title", values.text(OG_TITLE)),
        ("og:description", values.text(OG_DESCRIPTION)),
        ("og:image", first_text(values, &[OG_IMAGE, DEFAULT_IMAGE])),
        ("og:url", values.text(OG_URL)),
        ("og:type", values.text(OG_TYPE).or_else(|| Some("website".into()))),
        ("og:site_name", site_name),
        (
            "og:locale",
            values.text(OG_LOCALE).or_else(|| locale.map(str::to_owned)),
        ),
    ];
    properties
        .into_iter()
        .filter_map(|(property, content)| Some(meta_property(property, &content?)))
        .collect()
}

pub fn twitter(values: &Fields<'_>) -> Vec<String> {
    const TRIGGERS: [&str; 6] = [
        TWITTER_CARD,
        TWITTER_TITLE,
        TWITTER_DESCRIPTION,
        TWITTER_IMAGE,
        TWITTER_SITE,
        TWITTER_CREATOR,
    ];
    if !any_text(values, &TRIGGERS) {
        return Vec::new();
    }
    let names = [
        (
            "twitter:card",
            values.text(TWITTER_CARD).or_else(|| Some("summary_large_image".into())),
        ),
        ("twitter:title", first_text(values, &[TWITTER_TITLE, OG_TITLE])),
        (
            "twitter:description",
            first_text(values, &[TWITTER_DESCRIPTION, OG_DESCRIPTION]),
        ),
        (
            "twitter:image",
            first_text(values, &[TWITTER_IMAGE, OG_IMAGE, DEFAULT_IMAGE]),
        ),
        ("twitter:site", values.text(TWITTER_SITE)),
        ("twitter:creator", values.text(TWITTER_CREATOR)),
    ];
    names
        .into_iter()
        .filter_map(|(name, content)| Some(meta_name(name, &content?)))
        .collect()
}

pub fn facebook(values: &Fields<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(app_id) = values.text(FB_APP_ID) {
        lines.push(meta_property("fb:app_id", &app_id));
    }
    for admin in values.strings(FB_ADMINS) {
        lines.push(meta_property("fb:admins", &admin));
    }
    if let Some(publisher) = values.text(ARTICLE_PUBLISHER) {
        lines.push(meta_property("article:publisher", &publisher));
    }
    if let Some(author) = values.text(ARTICLE_AUTHOR) {
        lines.push(meta_property("article:author", &author));
    }
    lines
}

/// Reference comments, one per configured network, in stored order.
pub fn social_profiles(values: &Fields<'_>) -> Vec<String> {
    values
        .record(SOCIAL_PROFILES)
        .iter()
        .filter_map(|(network, url)| {
            let url = crate::value::as_text(url)?;
            Some(format!(
                "<!-- Social profile: {} {} -->",
                comment_text(network),
                comment_text(&url)
            ))
        })
        .collect()
}

pub fn default_image(values: &Fields<'_>) -> Vec<String> {
    values
        .text(DEFAULT_IMAGE)
        .map(|url| format!("<!-- Default share image: {} -->", comment_text(&url)))
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_essential_skips_blank_config() {
        assert_eq!(
            essential("UTF-8", "width=device-width, initial-scale=1"),
            vec![
                r#"<meta charset="UTF-8">"#.to_owned(),
                r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#.to_owned(),
            ]
        );
        assert_eq!(essential("utf-8", " ").len(), 1);
    }

    #[test]
    fn test_basic_escapes_content() {
        let data = json!({
            "meta_title": "Tom & Jerry",
            "meta_description": "Say \"hi\"",
            "meta_keywords": ["a", "b"],
            "google_verification": "abc"
        });
        let lines = basic(&Fields::new(&data));
        assert_eq!(lines[0], "<title>Tom &amp; Jerry</title>");
        assert_eq!(lines[1], r#"<meta name="description" content="Say &quot;hi&quot;">"#);
        assert_eq!(lines[2], r#"<meta name="keywords" content="a, b">"#);
        assert_eq!(lines[3], r#"<meta name="google-site-verification" content="abc">"#);
    }

    #[test]
    fn test_open_graph_trigger_and_fallbacks() {
        let site = SiteIdentity::new(Some("Acme"), None);
        let data = json!({ "og_site_name": "Ignored alone", "default_image": "https://x/d.png" });
        assert!(open_graph(&Fields::new(&data), &site, None).is_empty());

        let data = json!({ "og_title": "T", "default_image": "https://x/d.png" });
        let lines = open_graph(&Fields::new(&data), &site, None);
        assert_eq!(
            lines,
            vec![
                r#"<meta property="og:title" content="T">"#,
                r#"<meta property="og:image" content="https://x/d.png">"#,
                r#"<meta property="og:type" content="website">"#,
                r#"<meta property="og:site_name" content="Acme">"#,
            ]
        );
    }

    #[test]
    fn test_open_graph_without_site_name() {
        let data = json!({ "og_title": "T" });
        let lines = open_graph(&Fields::new(&data), &SiteIdentity::default(), None);
        assert!(!lines.iter().any(|l| l.contains("og:site_name")));
    }

    #[test]
    fn test_twitter_falls_back_to_open_graph() {
        let data = json!({ "og_title": "OG", "og_image": "https://x/og.png" });
        assert!(twitter(&Fields::new(&data)).is_empty());

        let data = json!({ "og_title": "OG", "og_image": "https://x/og.png", "twitter_site": "@acme" });
        let lines = twitter(&Fields::new(&data));
        assert_eq!(lines[0], r#"<meta name="twitter:card" content="summary_large_image">"#);
        assert_eq!(lines[1], r#"<meta name="twitter:title" content="OG">"#);
        assert_eq!(lines[2], r#"<meta name="twitter:image" content="https://x/og.png">"#);
        assert_eq!(lines[3], r#"<meta name="twitter:site" content="@acme">"#);
    }

    #[test]
    fn test_facebook_admins_list() {
        let data = json!({ "fb_app_id": "1", "fb_admins": "2, 3" });
        let lines = facebook(&Fields::new(&data));
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], r#"<meta property="fb:admins" content="3">"#);
    }

    #[test]
    fn test_comment_sections() {
        let data = json!({
            "social_profiles": { "twitter": "https://x.com/acme", "empty": "", "github": "https://github.com/acme" },
            "default_image": "https://x/d.png"
        });
        let values = Fields::new(&data);
        assert_eq!(
            social_profiles(&values),
            vec![
                "<!-- Social profile: twitter https://x.com/acme -->",
                "<!-- Social profile: github https://github.com/acme -->",
            ]
        );
        assert_eq!(default_image(&values), vec!["<!-- Default share image: https://x/d.png -->"]);
    }
}
