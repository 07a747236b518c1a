//! `[store]` section configuration.
//!
//! Locations of the settings record and the page list. Relative paths are
//! resolved against the project root.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[store]` section in seokit.toml.
///
/// # Example
/// ```toml
/// [store]
/// settings = "data/seo-settings.json"
/// pages = "data/pages.json"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// JSON file holding every scope's settings.
    #[serde(default = "defaults::store::settings")]
    #[educe(Default = defaults::store::settings())]
    pub settings: PathBuf,

    /// JSON array of page descriptors.
    #[serde(default = "defaults::store::pages")]
    #[educe(Default = defaults::store::pages())]
    pub pages: PathBuf,
}
