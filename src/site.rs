//! Site identity supplied by the host.

use serde::Serialize;

/// Site name and base URL used for the home breadcrumb and name fallbacks.
///
/// Missing data never corrupts output: blank values are replaced by clearly
/// labeled placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteIdentity {
    pub name: String,
    pub base_url: String,
}

impl SiteIdentity {
    pub const NAME_PLACEHOLDER: &'static str = "(site name not set)";
    pub const URL_PLACEHOLDER: &'static str = "/";

    pub fn new(name: Option<&str>, base_url: Option<&str>) -> Self {
        let pick = |value: Option<&str>, placeholder: &str| {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .unwrap_or(placeholder)
                .to_owned()
        };
        Self {
            name: pick(name, Self::NAME_PLACEHOLDER),
            base_url: pick(base_url, Self::URL_PLACEHOLDER),
        }
    }

    /// Whether a real site name was supplied.
    pub fn has_name(&self) -> bool {
        self.name != Self::NAME_PLACEHOLDER
    }

    /// Absolute URL for a root-relative path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}

impl Default for SiteIdentity {
    fn default() -> Self {
        Self::new(None, None)
    }
}
