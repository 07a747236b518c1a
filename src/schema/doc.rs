//! Building blocks shared by schema builders.
//!
//! [`Doc`] collects properties and silently drops absent or empty ones, so a
//! builder can chain every optional property without checking each first.
//! The free functions map raw form fragments to nested schema.org nodes; each
//! returns `None` (or an empty `Vec`) when the fragment is incomplete.

use crate::value::{Fields, as_text};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Number, Value};

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

// ============================================================================
// Document Builder
// ============================================================================

/// Ordered JSON-LD node under construction.
#[derive(Debug, Clone)]
pub struct Doc {
    map: Map<String, Value>,
}

impl Doc {
    /// Top-level document: `@context` then `@type`.
    pub fn new(kind: &str) -> Self {
        let mut map = Map::new();
        map.insert("@context".into(), Value::String(SCHEMA_CONTEXT.into()));
        map.insert("@type".into(), Value::String(kind.into()));
        Self { map }
    }

    /// Nested node: `@type` only.
    pub fn node(kind: &str) -> Self {
        let mut map = Map::new();
        map.insert("@type".into(), Value::String(kind.into()));
        Self { map }
    }

    pub fn text(self, key: &str, text: Option<String>) -> Self {
        self.value(key, text.map(Value::String))
    }

    pub fn number(self, key: &str, number: Option<f64>) -> Self {
        self.value(key, number.and_then(json_number))
    }

    pub fn flag(self, key: &str, flag: Option<bool>) -> Self {
        self.value(key, flag.map(Value::Bool))
    }

    /// Insert only when present.
    pub fn value(mut self, key: &str, value: Option<Value>) -> Self {
        if let Some(value) = value {
            self.map.insert(key.into(), value);
        }
        self
    }

    /// Insert only when non-empty. Always emitted as an array.
    pub fn list(self, key: &str, items: Vec<Value>) -> Self {
        let value = (!items.is_empty()).then_some(Value::Array(items));
        self.value(key, value)
    }

    /// Insert a single item as-is, several as an array, none not at all.
    pub fn one_or_many(self, key: &str, mut items: Vec<Value>) -> Self {
        let value = match items.len() {
            0 => None,
            1 => items.pop(),
            _ => Some(Value::Array(items)),
        };
        self.value(key, value)
    }

    pub fn strings(self, key: &str, items: Vec<String>) -> Self {
        self.list(key, items.into_iter().map(Value::String).collect())
    }

    pub fn build(self) -> Value {
        Value::Object(self.map)
    }
}

/// Whole numbers become integers; non-finite values are dropped.
pub fn json_number(n: f64) -> Option<Value> {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        #[allow(clippy::cast_possible_truncation)]
        return Some(Value::from(n as i64));
    }
    Number::from_f64(n).map(Value::Number)
}

// ============================================================================
// Durations
// ============================================================================

/// `PT{h}H{m}M` for a positive number of minutes.
pub fn minutes_to_duration(minutes: f64) -> Option<String> {
    if !minutes.is_finite() || minutes <= 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = minutes.round() as u64;
    Some(format!("PT{}H{}M", total / 60, total % 60))
}

/// Duration property that may be given as minutes or as an ISO 8601 string.
pub fn duration_field(fields: &Fields<'_>, key: &str) -> Option<String> {
    if let Some(minutes) = fields.number(key) {
        return minutes_to_duration(minutes);
    }
    fields
        .text(key)
        .filter(|text| text.starts_with('P') && text.len() > 1)
}

/// Span between two timestamps as `PT{h}H{m}M`.
///
/// Omitted when either endpoint is missing or unparsable, or when `end`
/// precedes `start`. A zero-length span yields `PT0H0M`.
pub fn duration_between(start: Option<&str>, end: Option<&str>) -> Option<String> {
    let start = parse_timestamp(start?)?;
    let end = parse_timestamp(end?)?;
    let minutes = (end - start).num_minutes();
    if minutes < 0 {
        return None;
    }
    Some(format!("PT{}H{}M", minutes / 60, minutes % 60))
}

/// Parse RFC 3339, `YYYY-MM-DDTHH:MM[:SS]`, `YYYY-MM-DD HH:MM[:SS]` or a bare
/// date. Zoned timestamps are normalized to UTC.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

// ============================================================================
// Enumerations
// ============================================================================

/// Map a loose form value onto a schema.org enumeration member URL.
///
/// Matching ignores case, spaces, `-` and `_`, and an existing
/// `https://schema.org/` prefix. Unknown values pass through unchanged.
pub fn schema_enum(text: &str, members: &[&str]) -> String {
    let key = normalize_enum(text);
    members
        .iter()
        .find(|member| normalize_enum(member) == key)
        .map_or_else(|| text.to_owned(), |member| format!("{SCHEMA_CONTEXT}/{member}"))
}

fn normalize_enum(text: &str) -> String {
    let text = text.trim();
    let text = text
        .strip_prefix("https://schema.org/")
        .or_else(|| text.strip_prefix("http://schema.org/"))
        .unwrap_or(text);
    text.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Pick a `@type` from an allow-list, falling back to `default`.
pub fn pick_type(text: Option<String>, allowed: &[&'static str], default: &'static str) -> &'static str {
    text.and_then(|text| {
        allowed
            .iter()
            .find(|kind| kind.eq_ignore_ascii_case(text.trim()))
            .copied()
    })
    .unwrap_or(default)
}

// ============================================================================
// Nested Nodes
// ============================================================================

/// One image URL, or several as an array.
pub fn image(fields: &Fields<'_>, key: &str) -> Option<Value> {
    let urls = fields.strings(key);
    match urls.len() {
        0 => None,
        1 => urls.into_iter().next().map(Value::String),
        _ => Some(Value::Array(urls.into_iter().map(Value::String).collect())),
    }
}

/// `Person` from a name string or a `{ name, url, ... }` record.
pub fn person(value: &Value) -> Option<Value> {
    if let Some(name) = as_text(value) {
        return Some(Doc::node("Person").text("name", Some(name)).build());
    }
    let f = Fields::new(value);
    let name = f.text("name")?;
    Some(
        Doc::node("Person")
            .text("name", Some(name))
            .text("url", f.text("url"))
            .text("jobTitle", f.text("jobTitle"))
            .text("image", f.text("image"))
            .build(),
    )
}

/// People from `key`: a list, a single record, or a single name.
pub fn people(fields: &Fields<'_>, key: &str) -> Vec<Value> {
    match fields.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(person).collect(),
        Some(value) => person(value).into_iter().collect(),
        None => Vec::new(),
    }
}

/// Reference to an organization from a name string or `{ name, url, logo }`.
pub fn organization_ref(value: Option<&Value>) -> Option<Value> {
    let value = value?;
    if let Some(name) = as_text(value) {
        return Some(Doc::node("Organization").text("name", Some(name)).build());
    }
    let f = Fields::new(value);
    let name = f.text("name")?;
    Some(
        Doc::node("Organization")
            .text("name", Some(name))
            .text("url", f.text("url"))
            .value("logo", image_object(f.text("logo")))
            .strings("sameAs", f.strings("sameAs"))
            .build(),
    )
}

/// `ImageObject` wrapper around a URL.
pub fn image_object(url: Option<String>) -> Option<Value> {
    url.map(|url| Doc::node("ImageObject").text("url", Some(url)).build())
}

/// `PostalAddress` when any address part is present.
pub fn postal_address(f: &Fields<'_>) -> Option<Value> {
    const PARTS: [&str; 5] = [
        "streetAddress",
        "addressLocality",
        "addressRegion",
        "postalCode",
        "addressCountry",
    ];
    if PARTS.iter().all(|part| f.text(part).is_none()) {
        return None;
    }
    let doc = PARTS
        .iter()
        .fold(Doc::node("PostalAddress"), |doc, part| doc.text(part, f.text(part)));
    Some(doc.build())
}

/// `Place` with a name and/or address.
pub fn place(f: &Fields<'_>) -> Option<Value> {
    let name = f.text("name");
    let address = postal_address(f).or_else(|| postal_address(&f.record("address")));
    if name.is_none() && address.is_none() {
        return None;
    }
    Some(
        Doc::node("Place")
            .text("name", name)
            .value("address", address)
            .build(),
    )
}

const AVAILABILITY: [&str; 9] = [
    "InStock",
    "OutOfStock",
    "PreOrder",
    "BackOrder",
    "Discontinued",
    "LimitedAvailability",
    "OnlineOnly",
    "InStoreOnly",
    "SoldOut",
];

/// `Offer` nodes; elements without a price are skipped.
pub fn offers(items: &[Value]) -> Vec<Value> {
    items
        .iter()
        .filter_map(|item| {
            let f = Fields::new(item);
            let price = f.text("price")?;
            Some(
                Doc::node("Offer")
                    .text("price", Some(price))
                    .text("priceCurrency", f.text("priceCurrency"))
                    .text(
                        "availability",
                        f.text("availability").map(|a| schema_enum(&a, &AVAILABILITY)),
                    )
                    .text("url", f.text("url"))
                    .text("validFrom", f.text("validFrom"))
                    .text("priceValidUntil", f.text("priceValidUntil"))
                    .build(),
            )
        })
        .collect()
}

/// `AggregateRating` when a rating value and a count are both present.
pub fn aggregate_rating(f: &Fields<'_>) -> Option<Value> {
    let value = f.text("ratingValue")?;
    let count = f.number("reviewCount").or_else(|| f.number("ratingCount"))?;
    Some(
        Doc::node("AggregateRating")
            .text("ratingValue", Some(value))
            .number("reviewCount", Some(count))
            .text("bestRating", f.text("bestRating"))
            .text("worstRating", f.text("worstRating"))
            .build(),
    )
}

/// `Rating` node.
pub fn rating(f: &Fields<'_>) -> Option<Value> {
    let value = f.text("ratingValue")?;
    Some(
        Doc::node("Rating")
            .text("ratingValue", Some(value))
            .text("bestRating", f.text("bestRating"))
            .text("worstRating", f.text("worstRating"))
            .build(),
    )
}

/// Embedded `Review` nodes; each needs an author and a rating.
pub fn reviews(items: &[Value]) -> Vec<Value> {
    items
        .iter()
        .filter_map(|item| {
            let f = Fields::new(item);
            let author = f.get("author").and_then(person)?;
            let rating = rating(&f)?;
            Some(
                Doc::node("Review")
                    .value("author", Some(author))
                    .value("reviewRating", Some(rating))
                    .text("reviewBody", f.text("reviewBody"))
                    .text("datePublished", f.text("datePublished"))
                    .build(),
            )
        })
        .collect()
}

/// Instruction steps from strings or `{ name, text, image, url }` records.
pub fn steps(items: &[Value], kind: &str) -> Vec<Value> {
    items
        .iter()
        .filter_map(|item| {
            if let Some(text) = as_text(item) {
                return Some(Doc::node(kind).text("text", Some(text)).build());
            }
            let f = Fields::new(item);
            let text = f.text("text")?;
            Some(
                Doc::node(kind)
                    .text("name", f.text("name"))
                    .text("text", Some(text))
                    .text("image", f.text("image"))
                    .text("url", f.text("url"))
                    .build(),
            )
        })
        .collect()
}
