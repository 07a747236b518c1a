//! Organization-like entities and people.

use crate::schema::doc::{Doc, image, image_object, pick_type, postal_address};
use crate::value::Fields;
use serde_json::Value;

const BUSINESS_TYPES: [&str; 12] = [
    "LocalBusiness",
    "Restaurant",
    "Store",
    "AutoRepair",
    "Dentist",
    "HealthAndBeautyBusiness",
    "HomeAndConstructionBusiness",
    "LegalService",
    "LodgingBusiness",
    "MedicalBusiness",
    "ProfessionalService",
    "RealEstateAgent",
];

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Properties shared by every organization flavour.
fn org_doc(kind: &str, f: &Fields<'_>, name: String) -> Doc {
    Doc::new(kind)
        .text("name", Some(name))
        .text("alternateName", f.text("alternateName"))
        .text("url", f.text("url"))
        .value("logo", image_object(f.text("logo")))
        .value("image", image(f, "image"))
        .text("description", f.text("description"))
        .text("email", f.text("email"))
        .text("telephone", f.text("telephone"))
        .value("address", postal_address(f).or_else(|| postal_address(&f.record("address"))))
        .strings("sameAs", f.strings("sameAs"))
        .value("contactPoint", contact_point(&f.record("contactPoint")))
}

fn contact_point(f: &Fields<'_>) -> Option<Value> {
    let telephone = f.text("telephone");
    let email = f.text("email");
    if telephone.is_none() && email.is_none() {
        return None;
    }
    Some(
        Doc::node("ContactPoint")
            .text("telephone", telephone)
            .text("email", email)
            .text("contactType", f.text("contactType"))
            .strings("availableLanguage", f.strings("availableLanguage"))
            .build(),
    )
}

pub fn organization(data: &Value) -> Option<Value> {
    let f = Fields::new(data);
    let name = f.text("name")?;
    Some(
        org_doc("Organization", &f, name)
            .text("foundingDate", f.text("foundingDate"))
            .text("legalName", f.text("legalName"))
            .build(),
    )
}

pub fn local_business(data: &Value) -> Option<Value> {
    let f = Fields::new(data);
    let name = f.text("name")?;
    let kind = pick_type(f.text("businessType"), &BUSINESS_TYPES, "LocalBusiness");
    Some(
        org_doc(kind, &f, name)
            .text("priceRange", f.text("priceRange"))
            .value("geo", geo(&f.record("geo")))
            .list("openingHoursSpecification", opening_hours(f.list("openingHours")))
            .build(),
    )
}

/// Emitted as `NGO`.
pub fn non_profit(data: &Value) -> Option<Value> {
    let f = Fields::new(data);
    let name = f.text("name")?;
    Some(
        org_doc("NGO", &f, name)
            .text("nonprofitStatus", f.text("nonprofitStatus"))
            .text("taxID", f.text("taxID"))
            .text("foundingDate", f.text("foundingDate"))
            .build(),
    )
}

/// Emitted as `OnlineStore`.
pub fn online_marketplace(data: &Value) -> Option<Value> {
    let f = Fields::new(data);
    let name = f.text("name")?;
    let search = f.text("searchUrl").filter(|url| url.contains("{search_term_string}"));
    Some(
        org_doc("OnlineStore", &f, name)
            .text("currenciesAccepted", f.text("currenciesAccepted"))
            .text("paymentAccepted", f.text("paymentAccepted"))
            .value("potentialAction", search.map(search_action))
            .build(),
    )
}

pub fn person(data: &Value) -> Option<Value> {
    let f = Fields::new(data);
    let name = f.text("name")?;
    Some(
        Doc::new("Person")
            .text("name", Some(name))
            .text("givenName", f.text("givenName"))
            .text("familyName", f.text("familyName"))
            .text("jobTitle", f.text("jobTitle"))
            .text("url", f.text("url"))
            .value("image", image(&f, "image"))
            .text("email", f.text("email"))
            .text("description", f.text("description"))
            .value(
                "worksFor",
                f.text("worksFor")
                    .map(|name| Doc::node("Organization").text("name", Some(name)).build()),
            )
            .value("address", postal_address(&f.record("address")))
            .strings("sameAs", f.strings("sameAs"))
            .build(),
    )
}

/// `SearchAction` for a URL template containing `{search_term_string}`.
pub(super) fn search_action(target: String) -> Value {
    Doc::node("SearchAction")
        .text("target", Some(target))
        .text("query-input", Some("required name=search_term_string".into()))
        .build()
}

fn geo(f: &Fields<'_>) -> Option<Value> {
    let latitude = f.number("latitude")?;
    let longitude = f.number("longitude")?;
    Some(
        Doc::node("GeoCoordinates")
            .number("latitude", Some(latitude))
            .number("longitude", Some(longitude))
            .build(),
    )
}

/// `OpeningHoursSpecification` rows; each needs days plus opens and closes.
fn opening_hours(items: &[Value]) -> Vec<Value> {
    items
        .iter()
        .filter_map(|item| {
            let f = Fields::new(item);
            let days: Vec<_> = f
                .strings("days")
                .into_iter()
                .filter_map(|day| {
                    DAY_NAMES
                        .iter()
                        .find(|name| name.eq_ignore_ascii_case(&day) || name[..3].eq_ignore_ascii_case(&day))
                        .map(|name| Value::String((*name).to_owned()))
                })
                .collect();
            if days.is_empty() {
                return None;
            }
            Some(
                Doc::node("OpeningHoursSpecification")
                    .one_or_many("dayOfWeek", days)
                    .text("opens", Some(f.text("opens")?))
                    .text("closes", Some(f.text("closes")?))
                    .build(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_organization_minimal() {
        let doc = organization(&json!({ "name": "Acme" })).unwrap();
        assert_eq!(
            doc,
            json!({ "@context": "https://schema.org", "@type": "Organization", "name": "Acme" })
        );
        assert!(organization(&json!({ "name": "  " })).is_none());
    }

    #[test]
    fn test_organization_optional_parts() {
        let doc = organization(&json!({
            "name": "Acme",
            "logo": "https://acme.test/logo.png",
            "sameAs": "https://x.com/acme, https://github.com/acme",
            "addressLocality": "Berlin",
            "contactPoint": { "telephone": "+49 1", "contactType": "support" }
        }))
        .unwrap();
        assert_eq!(doc["logo"]["@type"], json!("ImageObject"));
        assert_eq!(doc["sameAs"].as_array().unwrap().len(), 2);
        assert_eq!(doc["address"]["addressLocality"], json!("Berlin"));
        assert_eq!(doc["contactPoint"]["contactType"], json!("support"));
        assert!(doc.get("email").is_none());
    }

    #[test]
    fn test_local_business_subtype_and_hours() {
        let doc = local_business(&json!({
            "name": "Cafe",
            "businessType": "restaurant",
            "geo": { "latitude": "52.5", "longitude": 13.4 },
            "openingHours": [
                { "days": ["Mon", "tuesday"], "opens": "09:00", "closes": "17:00" },
                { "days": "Sat", "opens": "10:00" },
                { "days": ["Funday"], "opens": "1", "closes": "2" }
            ]
        }))
        .unwrap();
        assert_eq!(doc["@type"], json!("Restaurant"));
        assert_eq!(doc["geo"]["latitude"], json!(52.5));
        let hours = doc["openingHoursSpecification"].as_array().unwrap();
        assert_eq!(hours.len(), 1);
        assert_eq!(hours[0]["dayOfWeek"], json!(["Monday", "Tuesday"]));
    }

    #[test]
    fn test_non_profit_and_marketplace_types() {
        let ngo = non_profit(&json!({ "name": "Helpers" })).unwrap();
        assert_eq!(ngo["@type"], json!("NGO"));

        let store = online_marketplace(&json!({
            "name": "Shop",
            "searchUrl": "https://shop.test/?q={search_term_string}"
        }))
        .unwrap();
        assert_eq!(store["@type"], json!("OnlineStore"));
        assert_eq!(store["potentialAction"]["@type"], json!("SearchAction"));

        let no_template = online_marketplace(&json!({ "name": "Shop", "searchUrl": "https://shop.test/" }))
            .unwrap();
        assert!(no_template.get("potentialAction").is_none());
    }

    #[test]
    fn test_person() {
        assert!(person(&json!({ "jobTitle": "CTO" })).is_none());
        let doc = person(&json!({ "name": "Ada", "worksFor": "Acme" })).unwrap();
        assert_eq!(doc["worksFor"], json!({ "@type": "Organization", "name": "Acme" }));
    }
}
