//! Analytics and tracking integrations.
//!
//! Integrations render in a fixed canonical order, each with its own loading
//! mode. A mode applies only to the loader tag of its own integration.
//!
//! | Integration        | Id field        | Loader host                   | Body fallback |
//! |--------------------|-----------------|-------------------------------|---------------|
//! | Google Tag Manager | `gtm_id`        | www.googletagmanager.com      | `<iframe>`    |
//! | Google Analytics 4 | `ga4_id`        | www.googletagmanager.com      | -             |
//! | Google Ads         | `google_ads_id` | www.googletagmanager.com      | -             |
//! | Meta Pixel         | `meta_pixel_id` | connect.facebook.net          | `<img>`       |
//! | Microsoft Clarity  | `clarity_id`    | www.clarity.ms                | -             |
//! | Hotjar             | `hotjar_id`     | static.hotjar.com             | -             |

use super::escape::{html_escape, js_string};
use crate::settings::fields;
use crate::value::Fields;
use serde::Serialize;
use std::{fmt, str::FromStr};
use urlencoding::encode;

// ============================================================================
// Loading Policy
// ============================================================================

/// How a loader `<script>` is fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingMode {
    #[default]
    Async,
    Defer,
    Blocking,
}

impl LoadingMode {
    /// Attribute text including its leading space; empty for blocking.
    pub const fn attribute(self) -> &'static str {
        match self {
            Self::Async => " async",
            Self::Defer => " defer",
            Self::Blocking => "",
        }
    }

    /// Lenient parse for stored form values; anything unknown is `Async`.
    pub fn from_setting(text: Option<&str>) -> Self {
        text.and_then(|text| text.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for LoadingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "async" => Ok(Self::Async),
            "defer" => Ok(Self::Defer),
            "blocking" | "sync" | "none" => Ok(Self::Blocking),
            other => Err(format!("unknown loading mode `{other}`")),
        }
    }
}

impl fmt::Display for LoadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Async => "async",
            Self::Defer => "defer",
            Self::Blocking => "blocking",
        })
    }
}

/// Scriptable third-party integrations, in canonical output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Integration {
    GoogleTagManager,
    GoogleAnalytics,
    GoogleAds,
    MetaPixel,
    Clarity,
    Hotjar,
}

impl Integration {
    pub const ALL: [Self; 6] = [
        Self::GoogleTagManager,
        Self::GoogleAnalytics,
        Self::GoogleAds,
        Self::MetaPixel,
        Self::Clarity,
        Self::Hotjar,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::GoogleTagManager => "Google Tag Manager",
            Self::GoogleAnalytics => "Google Analytics 4",
            Self::GoogleAds => "Google Ads",
            Self::MetaPixel => "Meta Pixel",
            Self::Clarity => "Microsoft Clarity",
            Self::Hotjar => "Hotjar",
        }
    }

    pub const fn id_field(self) -> &'static str {
        match self {
            Self::GoogleTagManager => fields::GTM_ID,
            Self::GoogleAnalytics => fields::GA4_ID,
            Self::GoogleAds => fields::GOOGLE_ADS_ID,
            Self::MetaPixel => fields::META_PIXEL_ID,
            Self::Clarity => fields::CLARITY_ID,
            Self::Hotjar => fields::HOTJAR_ID,
        }
    }

    pub const fn loading_field(self) -> &'static str {
        match self {
            Self::GoogleTagManager => fields::GTM_LOADING,
            Self::GoogleAnalytics => fields::GA4_LOADING,
            Self::GoogleAds => fields::GOOGLE_ADS_LOADING,
            Self::MetaPixel => fields::META_PIXEL_LOADING,
            Self::Clarity => fields::CLARITY_LOADING,
            Self::Hotjar => fields::HOTJAR_LOADING,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Per-integration loading modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptPolicy {
    modes: [LoadingMode; 6],
}

impl ScriptPolicy {
    /// Read every `<integration>_loading` field.
    pub fn from_fields(values: &Fields<'_>) -> Self {
        let mut policy = Self::default();
        for integration in Integration::ALL {
            let text = values.text(integration.loading_field());
            policy.modes[integration.index()] = LoadingMode::from_setting(text.as_deref());
        }
        policy
    }

    pub const fn mode(&self, integration: Integration) -> LoadingMode {
        self.modes[integration.index()]
    }

    pub const fn with(mut self, integration: Integration, mode: LoadingMode) -> Self {
        self.modes[integration.index()] = mode;
        self
    }
}

// ============================================================================
// Snippets
// ============================================================================

/// Head lines for one integration with id `id`.
pub fn head_snippet(integration: Integration, id: &str, mode: LoadingMode) -> Vec<String> {
    let attr = mode.attribute();
    let url_id = encode(id);
    let js_id = js_string(id);
    let comment = format!("<!-- {} -->", integration.label());

    match integration {
        Integration::GoogleTagManager => vec![
            comment,
            "<script>window.dataLayer=window.dataLayer||[];window.dataLayer.push({'gtm.start':new Date().getTime(),event:'gtm.js'});</script>".to_owned(),
            format!(r#"<script{attr} src="https://www.googletagmanager.com/gtm.js?id={url_id}"></script>"#),
        ],
        Integration::GoogleAnalytics | Integration::GoogleAds => vec![
            comment,
            format!(r#"<script{attr} src="https://www.googletagmanager.com/gtag/js?id={url_id}"></script>"#),
            format!(
                "<script>window.dataLayer=window.dataLayer||[];function gtag(){{dataLayer.push(arguments);}}gtag('js',new Date());gtag('config',{js_id});</script>"
            ),
        ],
        Integration::MetaPixel => vec![
            comment,
            "<script>!function(f){if(f.fbq)return;var n=f.fbq=function(){n.callMethod?n.callMethod.apply(n,arguments):n.queue.push(arguments)};if(!f._fbq)f._fbq=n;n.push=n;n.loaded=!0;n.version='2.0';n.queue=[]}(window);</script>".to_owned(),
            format!(r#"<script{attr} src="https://connect.facebook.net/en_US/fbevents.js"></script>"#),
            format!("<script>fbq('init',{js_id});fbq('track','PageView');</script>"),
        ],
        Integration::Clarity => vec![
            comment,
            "<script>window.clarity=window.clarity||function(){(window.clarity.q=window.clarity.q||[]).push(arguments)};</script>".to_owned(),
            format!(r#"<script{attr} src="https://www.clarity.ms/tag/{url_id}"></script>"#),
        ],
        Integration::Hotjar => {
            // hjid is numeric; anything else is passed through as a string
            let hjid = if id.bytes().all(|b| b.is_ascii_digit()) {
                id.to_owned()
            } else {
                js_id
            };
            vec![
                comment,
                format!(
                    "<script>window.hj=window.hj||function(){{(hj.q=hj.q||[]).push(arguments)}};window._hjSettings={{hjid:{hjid},hjsv:6}};</script>"
                ),
                format!(r#"<script{attr} src="https://static.hotjar.com/c/hotjar-{url_id}.js?sv=6"></script>"#),
            ]
        }
    }
}

/// Body-start fallback for integrations that have one.
pub fn body_snippet(integration: Integration, id: &str) -> Option<String> {
    let url_id = encode(id);
    match integration {
        Integration::GoogleTagManager => Some(format!(
            r#"<noscript><iframe src="https://www.googletagmanager.com/ns.html?id={url_id}" height="0" width="0" style="display:none;visibility:hidden"></iframe></noscript>"#
        )),
        Integration::MetaPixel => Some(format!(
            r#"<noscript><img height="1" width="1" style="display:none" alt="" src="{}"></noscript>"#,
            html_escape(&format!("https://www.facebook.com/tr?id={url_id}&ev=PageView&noscript=1"))
        )),
        _ => None,
    }
}
