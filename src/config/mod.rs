//! Project configuration management for `seokit.toml`.
//!
//! # Sections
//!
//! | Section         | Purpose                                          |
//! |-----------------|--------------------------------------------------|
//! | `[site]`        | Site identity (name, url, language)              |
//! | `[output]`      | Rendering options (charset, viewport, JSON-LD)   |
//! | `[store]`       | Settings file and page list locations            |
//! | `[breadcrumbs]` | Site-wide breadcrumb defaults                    |
//!
//! # Example
//!
//! ```toml
//! [site]
//! name = "Acme Widgets"
//! url = "https://acme.example"
//!
//! [output]
//! pretty_json = true
//!
//! [store]
//! settings = "data/seo-settings.json"
//! pages = "data/pages.json"
//!
//! [breadcrumbs]
//! home_label = "Home"
//! ```

mod breadcrumbs;
pub mod defaults;
mod error;
mod output;
mod site;
mod store;

pub use error::ConfigError;

use breadcrumbs::BreadcrumbsSection;
use output::OutputSection;
use site::SiteSection;
use store::StoreSection;

use crate::{
    cli::{Cli, Commands},
    output::Composer,
    site::SiteIdentity,
};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing seokit.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SeoConfig {
    /// Absolute project root (set after loading)
    #[serde(skip)]
    #[educe(Default = PathBuf::from("./"))]
    pub root: PathBuf,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site identity
    #[serde(default)]
    pub site: SiteSection,

    /// Rendering options
    #[serde(default)]
    pub output: OutputSection,

    /// Persistence locations
    #[serde(default)]
    pub store: StoreSection,

    /// Breadcrumb defaults
    #[serde(default)]
    pub breadcrumbs: BreadcrumbsSection,
}

impl SeoConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SeoConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Site identity for breadcrumbs and name fallbacks
    pub fn identity(&self) -> SiteIdentity {
        self.site.identity()
    }

    /// Output Composer configured from `[site]` and `[output]`
    pub fn composer(&self) -> Composer {
        Composer::new(self.identity())
            .with_charset(self.output.charset.clone())
            .with_viewport(self.output.viewport.clone())
            .with_pretty_json(self.output.pretty_json)
            .with_locale(self.site.locale())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = Self::normalize_path(cli.root.as_deref().unwrap_or(Path::new("./")));
        self.config_path = Self::normalize_path(&root.join(&cli.config));

        Self::update_option(&mut self.store.settings, cli.settings.as_ref());
        Self::update_option(&mut self.store.pages, cli.pages.as_ref());
        if let Commands::Render { output, .. } = &cli.command {
            Self::update_option(&mut self.output.dir, output.as_ref());
        }

        self.update_path_with_root(&root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve every path relative to the root and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        self.store.settings = Self::normalize_path(&root.join(&self.store.settings));
        self.store.pages = Self::normalize_path(&root.join(&self.store.pages));
        self.output.dir = Self::normalize_path(&root.join(&self.output.dir));
        self.root = root.to_path_buf();
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.site.url
            && !url.trim().starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[site.url] must start with http:// or https://".into()
            ));
        }

        if self.store.settings == self.store.pages {
            bail!(ConfigError::Validation(
                "[store.settings] and [store.pages] must be different files".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_from_str() {
        let config = SeoConfig::from_str(
            r#"
            [site]
            name = "Acme"
            url = "https://acme.example"
        "#,
        )
        .unwrap();

        assert_eq!(config.site.name.as_deref(), Some("Acme"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let result = SeoConfig::from_str("[site\nname = \"Acme\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = SeoConfig::from_path(Path::new("/nonexistent/seokit.toml")).unwrap_err();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_validate_rejects_relative_url() {
        let config = SeoConfig::from_str(
            r#"
            [site]
            url = "acme.example"
        "#,
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("[site.url]"));
    }

    #[test]
    fn test_validate_rejects_shared_store_file() {
        let config = SeoConfig::from_str(
            r#"
            [store]
            settings = "seo.json"
            pages = "seo.json"
        "#,
        )
        .unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_update_with_cli_resolves_paths() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = Cli::parse_from(["seokit", "--root", root, "--pages", "data/pages.json", "render", "--all", "-o", "out"]);

        let mut config = SeoConfig::default();
        config.update_with_cli(&cli);

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.root, root);
        assert_eq!(config.config_path, root.join("seokit.toml"));
        assert_eq!(config.store.settings, root.join("seo-settings.json"));
        assert_eq!(config.store.pages, root.join("data/pages.json"));
        assert_eq!(config.output.dir, root.join("out"));
    }

    #[test]
    fn test_composer_uses_output_section() {
        let config = SeoConfig::from_str(
            r#"
            [site]
            name = "Acme"
            [output]
            charset = ""
        "#,
        )
        .unwrap();

        let composer = config.composer();
        assert_eq!(composer.site().name, "Acme");
    }

    #[test]
    fn test_seo_config_default() {
        let config = SeoConfig::default();

        assert_eq!(config.root, PathBuf::from("./"));
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.site.language, "en");
        assert!(config.breadcrumbs.enable);
        assert_eq!(config.store.settings, PathBuf::from("seo-settings.json"));
    }

    #[test]
    fn test_full_config_all_sections() {
        let config = r#"
            [site]
            name = "Acme"
            url = "https://acme.example"
            language = "de-DE"

            [output]
            charset = "UTF-8"
            viewport = "width=device-width"
            pretty_json = true
            dir = "dist/seo"

            [store]
            settings = "seo.json"
            pages = "pages.json"

            [breadcrumbs]
            enable = false
            home_label = "Start"
        "#;
        let config: SeoConfig = toml::from_str(config).unwrap();

        assert_eq!(config.site.language, "de-DE");
        assert_eq!(config.output.dir, PathBuf::from("dist/seo"));
        assert_eq!(config.store.settings, PathBuf::from("seo.json"));
        assert!(!config.breadcrumbs.enable);
    }

    #[test]
    fn test_unknown_top_level_field_rejection() {
        let config = r#"
            [unknown_section]
            field = "value"
        "#;
        let result: Result<SeoConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}
