//! Seokit - an SEO settings engine.
//!
//! Per-page overrides of site-wide SEO fields, schema.org JSON-LD builders,
//! breadcrumb trails derived from page URLs, and the head/body/footer blocks
//! that a host page template inserts.
//!
//! | Module         | Role                                              |
//! |----------------|---------------------------------------------------|
//! | [`settings`]   | Scope-keyed settings snapshots and their stores   |
//! | [`resolve`]    | Override Resolver                                 |
//! | [`schema`]     | Schema Type Registry and builders                 |
//! | [`breadcrumb`] | Breadcrumb Hierarchy Deriver                      |
//! | [`output`]     | Output Composer                                   |
//! | [`pipeline`]   | Snapshot to blocks, one scope or all of them      |

pub mod breadcrumb;
pub mod cli;
pub mod config;
pub mod logger;
pub mod output;
pub mod pipeline;
pub mod resolve;
pub mod schema;
pub mod settings;
pub mod site;
pub mod value;
