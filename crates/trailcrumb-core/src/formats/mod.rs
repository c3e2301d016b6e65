//! # Formats
//!
//! On-disk representations consumed by the engine's in-memory adapters.

pub mod site;

pub use site::{
    ContentTypeRecord, ItemRecord, SiteFixture, TaxonomyRecord, TermRecord, load_site, site_from_json,
};
