//! Creative works, pages and the site itself.

use super::organization::search_action;
use crate::schema::doc::{Doc, duration_field, image, organization_ref, people, pick_type};
use crate::value::Fields;
use serde_json::Value;

const ARTICLE_TYPES: [&str; 5] = [
    "Article",
    "NewsArticle",
    "BlogPosting",
    "TechArticle",
    "ScholarlyArticle",
];

const PAGE_TYPES: [&str; 8] = [
    "WebPage",
    "AboutPage",
    "ContactPage",
    "CollectionPage",
    "ItemPage",
    "ProfilePage",
    "SearchResultsPage",
    "CheckoutPage",
];

pub fn article(data: &Value) -> Option<Value> {
    let f = Fields::new(data);
    let headline = f.text("headline")?;
    let url = f.text("url")?;
    let kind = pick_type(f.text("articleType"), &ARTICLE_TYPES, "Article");

    let mut authors = people(&f, "authors");
    if authors.is_empty() {
        authors = people(&f, "author");
    }

    Some(
        Doc::new(kind)
            .text("headline", Some(headline))
            .text("url", Some(url.clone()))
            .text("description", f.text("description"))
            .value("image", image(&f, "image"))
            .text("datePublished", f.text("datePublished"))
            .text("dateModified", f.text("dateModified"))
            .one_or_many("author", authors)
            .value("publisher", organization_ref(f.get("publisher")))
            .text("articleSection", f.text("articleSection"))
            .strings("keywords", f.strings("keywords"))
            .number("wordCount", f.number("wordCount"))
            .text("inLanguage", f.text("inLanguage"))
            .value(
                "mainEntityOfPage",
                Some(Doc::node("WebPage").text("@id", Some(url)).build()),
            )
            .build(),
    )
}

pub fn video_object(data: &Value) -> Option<Value> {
    let f = Fields::new(data);
    let name = f.text("name")?;
    let thumbnail = f.strings("thumbnailUrl");
    if thumbnail.is_empty() {
        return None;
    }
    let upload_date = f.text("uploadDate")?;
    Some(
        Doc::new("VideoObject")
            .text("name", Some(name))
            .text("description", f.text("description"))
            .strings("thumbnailUrl", thumbnail)
            .text("uploadDate", Some(upload_date))
            .text("duration", duration_field(&f, "duration"))
            .text("contentUrl", f.text("contentUrl"))
            .text("embedUrl", f.text("embedUrl"))
            .value("publisher", organization_ref(f.get("publisher")))
            .build(),
    )
}

pub fn web_page(data: &Value) -> Option<Value> {
    let f = Fields::new(data);
    let url = f.text("url")?;
    let kind = pick_type(f.text("pageType"), &PAGE_TYPES, "WebPage");
    Some(
        Doc::new(kind)
            .text("url", Some(url))
            .text("name", f.text("name"))
            .text("description", f.text("description"))
            .text("inLanguage", f.text("inLanguage"))
            .value("primaryImageOfPage", image(&f, "image"))
            .text("datePublished", f.text("datePublished"))
            .text("dateModified", f.text("dateModified"))
            .value(
                "isPartOf",
                f.text("isPartOf")
                    .map(|url| Doc::node("WebSite").text("url", Some(url)).build()),
            )
            .build(),
    )
}

pub fn web_site(data: &Value) -> Option<Value> {
    let f = Fields::new(data);
    let name = f.text("name")?;
    let url = f.text("url")?;
    let search = f
        .text("searchUrl")
        .filter(|target| target.contains("{search_term_string}"));
    Some(
        Doc::new("WebSite")
            .text("name", Some(name))
            .text("alternateName", f.text("alternateName"))
            .text("url", Some(url))
            .text("description", f.text("description"))
            .text("inLanguage", f.text("inLanguage"))
            .value("publisher", organization_ref(f.get("publisher")))
            .value("potentialAction", search.map(search_action))
            .build(),
    )
}

/// `BreadcrumbList` from `items: [{ name, url }]`; incomplete items are skipped
/// and positions count only the kept ones.
pub fn breadcrumb_list(data: &Value) -> Option<Value> {
    let f = Fields::new(data);
    let items: Vec<_> = f
        .list("items")
        .iter()
        .filter_map(|item| {
            let item = Fields::new(item);
            Some((item.text("name")?, item.text("url")?))
        })
        .enumerate()
        .map(|(index, (name, url))| {
            Doc::node("ListItem")
                .value("position", Some(Value::from(index + 1)))
                .text("name", Some(name))
                .text("item", Some(url))
                .build()
        })
        .collect();
    if items.is_empty() {
        return None;
    }
    Some(Doc::new("BreadcrumbList").list("itemListElement", items).build())
}
