//! # Configuration
//!
//! Site-wide breadcrumb settings.
//!
//! The engine reads configuration through [`ConfigProvider`]. [`Settings`] is
//! the TOML-backed implementation:
//!
//! ```toml
//! home_label = "Home"
//! front_display = "page"
//! blog_page = 7
//!
//! [primary_taxonomy]
//! post = "category"
//!
//! [preferred_parent]
//! category = "post"
//!
//! [item_titles]
//! 12 = "Start here"
//!
//! [term_titles.category]
//! 4 = "All the news"
//! ```
//!
//! Id-keyed tables use string keys, as TOML requires.

use crate::{ItemId, TermId, TrailError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// What the site shows at its root URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FrontDisplay {
    /// A static page is the front page; posts live on a separate blog page.
    #[serde(rename = "page")]
    StaticPage,
    /// The front page lists the latest posts.
    #[default]
    #[serde(rename = "posts")]
    Posts,
}

// =============================================================================
// CONFIGPROVIDER TRAIT
// =============================================================================

/// Typed lookup of every setting the engine consults.
///
/// Lookups that return `Option<&str>` may return empty strings; the engine
/// treats them as absent.
pub trait ConfigProvider {
    /// Label of the leading home crumb. Empty disables it.
    fn home_label(&self) -> &str;

    /// Prefix for date and author archive crumbs.
    fn archive_prefix(&self) -> &str;

    /// Prefix for the search results crumb.
    fn search_prefix(&self) -> &str;

    /// Label of the not-found crumb.
    fn not_found_label(&self) -> &str;

    /// Whether single posts get a blog-index crumb.
    fn display_blog_crumb(&self) -> bool;

    fn front_display(&self) -> FrontDisplay;

    /// The page listing blog posts when the front page is static.
    fn blog_page(&self) -> Option<ItemId>;

    /// `strftime` format for the day archive crumb.
    fn date_format(&self) -> &str;

    /// Taxonomy used for crumbs of root items of a content type.
    fn primary_taxonomy(&self, content_type: &str) -> Option<&str>;

    /// Explicitly chosen primary term of an item within a taxonomy.
    fn primary_term(&self, item: ItemId, taxonomy: &str) -> Option<TermId>;

    /// Content type archive (or the blog sentinel) placed before a taxonomy's terms.
    fn preferred_parent(&self, taxonomy: &str) -> Option<&str>;

    /// Breadcrumb title override for a content type archive.
    fn archive_title(&self, content_type: &str) -> Option<&str>;

    /// Breadcrumb title override for an item.
    fn item_title(&self, item: ItemId) -> Option<&str>;

    /// Breadcrumb title override for a term.
    fn term_title(&self, term: TermId, taxonomy: &str) -> Option<&str>;
}

// =============================================================================
// SETTINGS
// =============================================================================

/// TOML-backed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub home_label: String,
    pub archive_prefix: String,
    pub search_prefix: String,
    pub not_found_label: String,
    pub display_blog_crumb: bool,
    pub front_display: FrontDisplay,
    pub blog_page: Option<u64>,
    pub date_format: String,
    /// content type -> taxonomy
    pub primary_taxonomy: BTreeMap<String, String>,
    /// taxonomy -> item id -> term id
    pub primary_terms: BTreeMap<String, BTreeMap<String, u64>>,
    /// taxonomy -> content type (or blog sentinel)
    pub preferred_parent: BTreeMap<String, String>,
    /// content type -> title
    pub archive_titles: BTreeMap<String, String>,
    /// item id -> title
    pub item_titles: BTreeMap<String, String>,
    /// taxonomy -> term id -> title
    pub term_titles: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            home_label: "Home".to_string(),
            archive_prefix: "Archives for".to_string(),
            search_prefix: "You searched for".to_string(),
            not_found_label: "Error 404: Page not found".to_string(),
            display_blog_crumb: true,
            front_display: FrontDisplay::Posts,
            blog_page: None,
            date_format: "%B %-d, %Y".to_string(),
            primary_taxonomy: BTreeMap::new(),
            primary_terms: BTreeMap::new(),
            preferred_parent: BTreeMap::new(),
            archive_titles: BTreeMap::new(),
            item_titles: BTreeMap::new(),
            term_titles: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Create default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, TrailError> {
        toml::from_str(text).map_err(|e| TrailError::Config(e.to_string()))
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, TrailError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| TrailError::Io(format!("Cannot read '{}': {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Load settings from a file when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, TrailError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

impl ConfigProvider for Settings {
    fn home_label(&self) -> &str {
        &self.home_label
    }

    fn archive_prefix(&self) -> &str {
        &self.archive_prefix
    }

    fn search_prefix(&self) -> &str {
        &self.search_prefix
    }

    fn not_found_label(&self) -> &str {
        &self.not_found_label
    }

    fn display_blog_crumb(&self) -> bool {
        self.display_blog_crumb
    }

    fn front_display(&self) -> FrontDisplay {
        self.front_display
    }

    fn blog_page(&self) -> Option<ItemId> {
        self.blog_page.filter(|&id| id != 0).map(ItemId)
    }

    fn date_format(&self) -> &str {
        &self.date_format
    }

    fn primary_taxonomy(&self, content_type: &str) -> Option<&str> {
        non_empty(self.primary_taxonomy.get(content_type))
    }

    fn primary_term(&self, item: ItemId, taxonomy: &str) -> Option<TermId> {
        self.primary_terms
            .get(taxonomy)
            .and_then(|terms| terms.get(&item.0.to_string()))
            .filter(|&&id| id != 0)
            .map(|&id| TermId(id))
    }

    fn preferred_parent(&self, taxonomy: &str) -> Option<&str> {
        non_empty(self.preferred_parent.get(taxonomy))
    }

    fn archive_title(&self, content_type: &str) -> Option<&str> {
        non_empty(self.archive_titles.get(content_type))
    }

    fn item_title(&self, item: ItemId) -> Option<&str> {
        non_empty(self.item_titles.get(&item.0.to_string()))
    }

    fn term_title(&self, term: TermId, taxonomy: &str) -> Option<&str> {
        non_empty(
            self.term_titles
                .get(taxonomy)
                .and_then(|titles| titles.get(&term.0.to_string())),
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
