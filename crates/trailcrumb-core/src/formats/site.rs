//! # Site Fixture Format
//!
//! JSON description of a site's content graph, loaded into a [`SiteGraph`].
//!
//! ## Format
//!
//! ```json
//! {
//!   "home_url": "https://example.com",
//!   "content_types": [{ "name": "book", "label": "Books", "has_archive": true }],
//!   "taxonomies": [{ "name": "category", "hierarchical": true }],
//!   "items": [{ "id": 12, "content_type": "post", "slug": "hello", "title": "Hello",
//!               "terms": { "category": [3] } }],
//!   "terms": [{ "id": 3, "taxonomy": "category", "slug": "news", "name": "News" }],
//!   "private_readers": ["page"]
//! }
//! ```
//!
//! Loading validates the graph invariants the engine relies on: every parent
//! reference resolves and no parent chain loops back on itself.

use crate::graph::SiteGraph;
use crate::{ItemId, TermId, TrailError, Visibility};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

// =============================================================================
// RECORDS
// =============================================================================

/// A content type entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeRecord {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub menu_name: String,
    #[serde(default)]
    pub has_archive: bool,
    /// Archive path segment; defaults to the type name.
    #[serde(default)]
    pub archive_slug: Option<String>,
    /// Path segment prefixed to item permalinks of this type.
    #[serde(default)]
    pub rewrite_base: Option<String>,
}

impl ContentTypeRecord {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            menu_name: String::new(),
            has_archive: false,
            archive_slug: None,
            rewrite_base: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_menu_name(mut self, menu_name: impl Into<String>) -> Self {
        self.menu_name = menu_name.into();
        self
    }

    #[must_use]
    pub fn with_archive(mut self) -> Self {
        self.has_archive = true;
        self
    }
}

/// A taxonomy entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyRecord {
    pub name: String,
    #[serde(default)]
    pub hierarchical: bool,
    /// Path segment for term archives; defaults to the taxonomy name.
    #[serde(default)]
    pub base: Option<String>,
}

impl TaxonomyRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, hierarchical: bool) -> Self {
        Self {
            name: name.into(),
            hierarchical,
            base: None,
        }
    }
}

/// A content item entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    pub content_type: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub parent: ItemId,
    /// Explicit ancestor chain, oldest first.
    #[serde(default)]
    pub ancestors: Option<Vec<ItemId>>,
    #[serde(default)]
    pub visibility: Visibility,
    /// Term ids per taxonomy, in assignment order.
    #[serde(default)]
    pub terms: BTreeMap<String, Vec<TermId>>,
}

impl ItemRecord {
    #[must_use]
    pub fn new(
        id: u64,
        content_type: impl Into<String>,
        slug: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: ItemId(id),
            content_type: content_type.into(),
            slug: slug.into(),
            title: title.into(),
            parent: ItemId::NONE,
            ancestors: None,
            visibility: Visibility::Publish,
            terms: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: u64) -> Self {
        self.parent = ItemId(parent);
        self
    }

    #[must_use]
    pub fn with_ancestors(mut self, ancestors: &[u64]) -> Self {
        self.ancestors = Some(ancestors.iter().map(|&id| ItemId(id)).collect());
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn with_terms(mut self, taxonomy: impl Into<String>, terms: &[u64]) -> Self {
        self.terms
            .insert(taxonomy.into(), terms.iter().map(|&id| TermId(id)).collect());
        self
    }
}

/// A taxonomy term entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRecord {
    pub id: TermId,
    pub taxonomy: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub parent: TermId,
    #[serde(default)]
    pub order: Option<i64>,
}

impl TermRecord {
    #[must_use]
    pub fn new(
        id: u64,
        taxonomy: impl Into<String>,
        slug: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: TermId(id),
            taxonomy: taxonomy.into(),
            slug: slug.into(),
            name: name.into(),
            parent: TermId::ROOT,
            order: None,
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: u64) -> Self {
        self.parent = TermId(parent);
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }
}

/// Top-level site fixture document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteFixture {
    pub home_url: String,
    #[serde(default)]
    pub content_types: Vec<ContentTypeRecord>,
    #[serde(default)]
    pub taxonomies: Vec<TaxonomyRecord>,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
    #[serde(default)]
    pub terms: Vec<TermRecord>,
    /// Content types whose private items the current actor may read.
    #[serde(default)]
    pub private_readers: Vec<String>,
}

// =============================================================================
// LOADING
// =============================================================================

/// Parse a site fixture from JSON and build a validated graph.
pub fn site_from_json(json: &str) -> Result<SiteGraph, TrailError> {
    let fixture: SiteFixture =
        serde_json::from_str(json).map_err(|e| TrailError::Fixture(e.to_string()))?;
    SiteGraph::from_fixture(fixture)
}

/// Read a site fixture file and build a validated graph.
pub fn load_site(path: &Path) -> Result<SiteGraph, TrailError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| TrailError::Io(format!("Cannot read '{}': {}", path.display(), e)))?;
    site_from_json(&json)
}

// =============================================================================
// TESTS
// =============================================================================
