//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn name() -> Option<String> {
        None
    }

    pub fn url() -> Option<String> {
        None
    }

    pub fn language() -> String {
        "en".into()
    }
}

// ============================================================================
// [output] Section Defaults
// ============================================================================

pub mod output {
    use std::path::PathBuf;

    pub fn charset() -> String {
        crate::output::DEFAULT_CHARSET.into()
    }

    pub fn viewport() -> String {
        crate::output::DEFAULT_VIEWPORT.into()
    }

    pub fn dir() -> PathBuf {
        "seo".into()
    }
}

// ============================================================================
// [store] Section Defaults
// ============================================================================

pub mod store {
    use std::path::PathBuf;

    pub fn settings() -> PathBuf {
        "seo-settings.json".into()
    }

    pub fn pages() -> PathBuf {
        "pages.json".into()
    }
}

// ============================================================================
// [breadcrumbs] Section Defaults
// ============================================================================

pub mod breadcrumbs {
    pub fn home_label() -> Option<String> {
        None
    }
}
