//! `[site]` section configuration.
//!
//! Identity of the site whose pages are being rendered.

use super::defaults;
use crate::site::SiteIdentity;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in seokit.toml.
///
/// # Example
/// ```toml
/// [site]
/// name = "Acme Widgets"
/// url = "https://acme.example"
/// language = "en-US"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteSection {
    /// Site name, used for the home crumb and `og:site_name` fallback.
    #[serde(default = "defaults::site::name")]
    #[educe(Default = defaults::site::name())]
    pub name: Option<String>,

    /// Absolute base URL. Breadcrumb URLs are built on top of it.
    #[serde(default = "defaults::site::url")]
    #[educe(Default = defaults::site::url())]
    pub url: Option<String>,

    /// BCP 47 language code; feeds `og:locale` when no locale is set.
    #[serde(default = "defaults::site::language")]
    #[educe(Default = defaults::site::language())]
    pub language: String,
}

impl SiteSection {
    pub fn identity(&self) -> SiteIdentity {
        SiteIdentity::new(self.name.as_deref(), self.url.as_deref())
    }

    /// `og:locale` form of the language (`en-US` → `en_US`).
    pub fn locale(&self) -> Option<String> {
        let language = self.language.trim();
        (!language.is_empty()).then(|| language.replace('-', "_"))
    }
}
