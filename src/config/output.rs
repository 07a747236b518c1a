//! `[output]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[output]` section in seokit.toml - rendering options.
///
/// # Example
/// ```toml
/// [output]
/// charset = "UTF-8"
/// viewport = "width=device-width, initial-scale=1"
/// pretty_json = true
/// dir = "seo"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// `<meta charset>` value; empty skips the tag.
    #[serde(default = "defaults::output::charset")]
    #[educe(Default = defaults::output::charset())]
    pub charset: String,

    /// Viewport content; empty skips the tag.
    #[serde(default = "defaults::output::viewport")]
    #[educe(Default = defaults::output::viewport())]
    pub viewport: String,

    /// Indent JSON-LD documents.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub pretty_json: bool,

    /// Directory receiving `render --all` output.
    #[serde(default = "defaults::output::dir")]
    #[educe(Default = defaults::output::dir())]
    pub dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::super::SeoConfig;
    use std::path::PathBuf;

    #[test]
    fn test_output_section_defaults() {
        let config: SeoConfig = toml::from_str("").unwrap();

        assert_eq!(config.output.charset, "UTF-8");
        assert_eq!(config.output.viewport, "width=device-width, initial-scale=1");
        assert!(!config.output.pretty_json);
        assert_eq!(config.output.dir, PathBuf::from("seo"));
    }

    #[test]
    fn test_output_section_partial_override() {
        let config = r#"
            [output]
            viewport = ""
            pretty_json = true
        "#;
        let config: SeoConfig = toml::from_str(config).unwrap();

        assert_eq!(config.output.viewport, "");
        assert!(config.output.pretty_json);
        // charset keeps its default
        assert_eq!(config.output.charset, "UTF-8");
    }
}
