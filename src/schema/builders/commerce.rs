//! Products, services and reviews of them.

use crate::schema::doc::{
    Doc, aggregate_rating, image, offers, organization_ref, person, pick_type, rating, reviews,
};
use crate::value::Fields;
use serde_json::Value;

pub fn product(data: &Value) -> Option<Value> {
    let f = Fields::new(data);
    let name = f.text("name")?;

    // a single offer can be given inline as price/priceCurrency/availability
    let mut offer_nodes = offers(f.list("offers"));
    if offer_nodes.is_empty() {
        offer_nodes = offers(std::slice::from_ref(data));
    }

    Some(
        Doc::new("Product")
            .text("name", Some(name))
            .text("description", f.text("description"))
            .value("image", image(&f, "image"))
            .text("sku", f.text("sku"))
            .text("mpn", f.text("mpn"))
            .text("gtin", f.text("gtin"))
            .value(
                "brand",
                f.text("brand")
                    .map(|brand| Doc::node("Brand").text("name", Some(brand)).build()),
            )
            .text("category", f.text("category"))
            .one_or_many("offers", offer_nodes)
            .value("aggregateRating", aggregate_rating(&f.record("rating")))
            .list("review", reviews(f.list("reviews")))
            .build(),
    )
}

pub fn service(data: &Value) -> Option<Value> {
    let f = Fields::new(data);
    let name = f.text("name")?;
    Some(
        Doc::new("Service")
            .text("name", Some(name))
            .text("serviceType", f.text("serviceType"))
            .text("description", f.text("description"))
            .value("image", image(&f, "image"))
            .text("url", f.text("url"))
            .value("provider", organization_ref(f.get("provider")))
            .text("areaServed", f.text("areaServed"))
            .one_or_many("offers", offers(f.list("offers")))
            .value("aggregateRating", aggregate_rating(&f.record("rating")))
            .build(),
    )
}

const ITEM_TYPES: [&str; 9] = [
    "Thing",
    "Product",
    "Service",
    "Organization",
    "LocalBusiness",
    "Book",
    "Movie",
    "Course",
    "Recipe",
];

/// Stand-alone `Review` of a named item.
pub fn review(data: &Value) -> Option<Value> {
    let f = Fields::new(data);
    let item_name = f.text("itemName")?;
    let rating = rating(&f)?;
    let item_type = pick_type(f.text("itemType"), &ITEM_TYPES, "Thing");
    Some(
        Doc::new("Review")
            .value(
                "itemReviewed",
                Some(
                    Doc::node(item_type)
                        .text("name", Some(item_name))
                        .text("url", f.text("itemUrl"))
                        .build(),
                ),
            )
            .value("reviewRating", Some(rating))
            .value("author", f.get("author").and_then(person))
            .text("reviewBody", f.text("reviewBody"))
            .text("datePublished", f.text("datePublished"))
            .value("publisher", organization_ref(f.get("publisher")))
            .build(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_offers_and_rating() {
        let doc = product(&json!({
            "name": "Widget",
            "brand": "Acme",
            "offers": [
                { "price": 10, "priceCurrency": "USD", "availability": "in stock" },
                { "price": "12.50", "priceCurrency": "EUR" }
            ],
            "rating": { "ratingValue": "4.6", "reviewCount": 8 },
            "reviews": [
                { "author": "Ann", "ratingValue": 5, "reviewBody": "Great" },
                { "ratingValue": 1 }
            ]
        }))
        .unwrap();
        assert_eq!(doc["brand"]["name"], json!("Acme"));
        assert_eq!(doc["offers"].as_array().unwrap().len(), 2);
        assert_eq!(doc["offers"][0]["availability"], json!("https://schema.org/InStock"));
        assert_eq!(doc["aggregateRating"]["reviewCount"], json!(8));
        assert_eq!(doc["review"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_product_inline_offer() {
        let doc = product(&json!({ "name": "Widget", "price": "5", "priceCurrency": "GBP" })).unwrap();
        assert_eq!(doc["offers"]["@type"], json!("Offer"));
        assert_eq!(doc["offers"]["price"], json!("5"));

        let bare = product(&json!({ "name": "Widget" })).unwrap();
        assert!(bare.get("offers").is_none());
    }

    #[test]
    fn test_service_provider() {
        let doc = service(&json!({ "name": "Consulting", "provider": "Acme" })).unwrap();
        assert_eq!(doc["provider"]["name"], json!("Acme"));
        assert!(service(&json!({ "provider": "Acme" })).is_none());
    }

    #[test]
    fn test_review_requires_item_and_rating() {
        assert!(review(&json!({ "itemName": "Widget" })).is_none());
        assert!(review(&json!({ "ratingValue": 4 })).is_none());
        let doc = review(&json!({
            "itemName": "Widget",
            "itemType": "product",
            "ratingValue": 4,
            "bestRating": 5,
            "author": { "name": "Ann" }
        }))
        .unwrap();
        assert_eq!(doc["itemReviewed"]["@type"], json!("Product"));
        assert_eq!(doc["reviewRating"]["ratingValue"], json!("4"));
        assert_eq!(doc["author"]["name"], json!("Ann"));
    }
}
