//! `[breadcrumbs]` section configuration.
//!
//! Site-wide defaults; the settings record overrides both per scope.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[breadcrumbs]` section in seokit.toml.
///
/// # Example
/// ```toml
/// [breadcrumbs]
/// enable = true
/// home_label = "Home"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BreadcrumbsSection {
    /// Emit breadcrumb structured data when no scope says otherwise.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Home crumb label; the site name when unset.
    #[serde(default = "defaults::breadcrumbs::home_label")]
    #[educe(Default = defaults::breadcrumbs::home_label())]
    pub home_label: Option<String>,
}
