//! One pure builder per schema type.
//!
//! | File              | Types                                                     |
//! |-------------------|-----------------------------------------------------------|
//! | `organization.rs` | Organization, LocalBusiness, NGO, OnlineStore, Person     |
//! | `creative.rs`     | Article, VideoObject, WebPage, WebSite, BreadcrumbList     |
//! | `instructions.rs` | HowTo, Recipe, FAQPage                                    |
//! | `commerce.rs`     | Product, Service, Review                                  |
//! | `events.rs`       | Event, Course, JobPosting                                 |
//! | `custom.rs`       | Custom JSON-LD                                            |

mod commerce;
mod creative;
mod custom;
mod events;
mod instructions;
mod organization;

pub use commerce::{product, review, service};
pub use creative::{article, breadcrumb_list, video_object, web_page, web_site};
pub use custom::custom;
pub use events::{course, event, job_posting};
pub use instructions::{faq_page, how_to, recipe};
pub use organization::{local_business, non_profit, online_marketplace, organization, person};
