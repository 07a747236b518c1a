//! Time-bound offerings: events, courses and job postings.

use crate::schema::doc::{
    Doc, duration_between, image, offers, organization_ref, people, pick_type,
    place, postal_address, schema_enum,
};
use crate::value::Fields;
use serde_json::Value;

const EVENT_TYPES: [&str; 10] = [
    "Event",
    "BusinessEvent",
    "ComedyEvent",
    "EducationEvent",
    "ExhibitionEvent",
    "Festival",
    "MusicEvent",
    "SocialEvent",
    "SportsEvent",
    "TheaterEvent",
];

const ATTENDANCE_MODES: [&str; 3] = [
    "OfflineEventAttendanceMode",
    "OnlineEventAttendanceMode",
    "MixedEventAttendanceMode",
];

const EVENT_STATUSES: [&str; 5] = [
    "EventScheduled",
    "EventCancelled",
    "EventMovedOnline",
    "EventPostponed",
    "EventRescheduled",
];

const EMPLOYMENT_TYPES: [&str; 8] = [
    "FULL_TIME",
    "PART_TIME",
    "CONTRACTOR",
    "TEMPORARY",
    "INTERN",
    "VOLUNTEER",
    "PER_DIEM",
    "OTHER",
];

pub fn event(data: &Value) -> Option<Value> {
    let f = Fields::new(data);
    let name = f.text("name")?;
    let start = f.text("startDate")?;
    let end = f.text("endDate");
    let duration = duration_between(Some(start.as_str()), end.as_deref());

    let attendance = f.text("attendanceMode").map(|mode| {
        let mode = match mode.to_ascii_lowercase().as_str() {
            "offline" => "OfflineEventAttendanceMode".to_owned(),
            "online" => "OnlineEventAttendanceMode".to_owned(),
            "mixed" => "MixedEventAttendanceMode".to_owned(),
            _ => mode,
        };
        schema_enum(&mode, &ATTENDANCE_MODES)
    });
    let location = place(&f.record("location")).or_else(|| {
        f.text("onlineUrl")
            .map(|url| Doc::node("VirtualLocation").text("url", Some(url)).build())
    });

    Some(
        Doc::new(pick_type(f.text("eventType"), &EVENT_TYPES, "Event"))
            .text("name", Some(name))
            .text("description", f.text("description"))
            .value("image", image(&f, "image"))
            .text("startDate", Some(start))
            .text("endDate", end)
            .text("duration", duration)
            .text("eventAttendanceMode", attendance)
            .text(
                "eventStatus",
                f.text("eventStatus").map(|s| schema_enum(&s, &EVENT_STATUSES)),
            )
            .value("location", location)
            .value("organizer", organization_ref(f.get("organizer")))
            .one_or_many("performer", people(&f, "performers"))
            .one_or_many("offers", offers(f.list("offers")))
            .build(),
    )
}

pub fn course(data: &Value) -> Option<Value> {
    let f = Fields::new(data);
    let name = f.text("name")?;
    let description = f.text("description")?;

    let instances: Vec<_> = f
        .list("hasCourseInstance")
        .iter()
        .filter_map(|item| {
            let item = Fields::new(item);
            let mode = item.text("courseMode")?;
            Some(
                Doc::node("CourseInstance")
                    .text("courseMode", Some(mode))
                    .text("courseWorkload", item.text("courseWorkload"))
                    .text("startDate", item.text("startDate"))
                    .text("endDate", item.text("endDate"))
                    .build(),
            )
        })
        .collect();

    Some(
        Doc::new("Course")
            .text("name", Some(name))
            .text("description", Some(description))
            .text("courseCode", f.text("courseCode"))
            .value("provider", organization_ref(f.get("provider")))
            .text("url", f.text("url"))
            .text("inLanguage", f.text("inLanguage"))
            .one_or_many("offers", offers(f.list("offers")))
            .list("hasCourseInstance", instances)
            .build(),
    )
}

pub fn job_posting(data: &Value) -> Option<Value> {
    let f = Fields::new(data);
    let title = f.text("title")?;
    let description = f.text("description")?;
    let date_posted = f.text("datePosted")?;
    // a bare string is not enough here, the organization must be a record
    let hiring = organization_ref(f.get("hiringOrganization").filter(|v| v.is_object()))?;

    let employment: Vec<_> = f
        .strings("employmentType")
        .into_iter()
        .map(|kind| {
            let normalized = kind.trim().to_ascii_uppercase().replace([' ', '-'], "_");
            EMPLOYMENT_TYPES
                .iter()
                .find(|known| **known == normalized)
                .map_or(kind, |known| (*known).to_owned())
        })
        .map(Value::String)
        .collect();

    let remote = f.flag("remote");
    let location = postal_address(&f.record("jobLocation")).map(|address| {
        Doc::node("Place")
            .value("address", Some(address))
            .build()
    });

    Some(
        Doc::new("JobPosting")
            .text("title", Some(title))
            .text("description", Some(description))
            .text("datePosted", Some(date_posted))
            .text("validThrough", f.text("validThrough"))
            .one_or_many("employmentType", employment)
            .value("hiringOrganization", Some(hiring))
            .value("jobLocation", location)
            .text("jobLocationType", remote.then(|| "TELECOMMUTE".to_owned()))
            .value("baseSalary", base_salary(&f.record("baseSalary")))
            .flag("directApply", f.opt_flag("directApply"))
            .build(),
    )
}

fn base_salary(f: &Fields<'_>) -> Option<Value> {
    let value = f.number("value");
    let min = f.number("minValue");
    let max = f.number("maxValue");
    if value.is_none() && min.is_none() && max.is_none() {
        return None;
    }
    let amount = Doc::node("QuantitativeValue")
        .number("value", value)
        .number("minValue", min)
        .number("maxValue", max)
        .text("unitText", f.text("unitText"))
        .build();
    Some(
        Doc::node("MonetaryAmount")
            .text("currency", f.text("currency"))
            .value("value", Some(amount))
            .build(),
    )
}
