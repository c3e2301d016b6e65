//! # Content Graph
//!
//! Read-only query surface over content items, taxonomy terms and content
//! type archives.
//!
//! The engine only ever talks to the [`ContentGraph`] trait; hosts plug in
//! their own store. [`SiteGraph`] is the in-memory implementation used by the
//! binary and the tests. All of its data structures use `BTreeMap` for
//! deterministic ordering.

use crate::formats::{ContentTypeRecord, ItemRecord, SiteFixture, TaxonomyRecord, TermRecord};
use crate::{ContentItem, ContentType, ItemId, Term, TermId, TrailError, Visibility};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// CONTENTGRAPH TRAIT
// =============================================================================

/// The ContentGraph trait defines the queries the breadcrumb engine issues.
///
/// Implementations must be side-effect free. Parent chains (items and terms)
/// must be acyclic: the engine walks them without cycle detection.
///
/// All operations return `Result<T, TrailError>` so that persistent or remote
/// backends can report failures uniformly.
pub trait ContentGraph {
    /// Lookup a content item.
    fn item(&self, id: ItemId) -> Result<Option<ContentItem>, TrailError>;

    /// Terms an item carries in one taxonomy, in assignment order.
    fn item_terms(&self, id: ItemId, taxonomy: &str) -> Result<Vec<Term>, TrailError>;

    /// Lookup a term within a taxonomy.
    fn term(&self, id: TermId, taxonomy: &str) -> Result<Option<Term>, TrailError>;

    /// Whether terms of this taxonomy can have parents. Unknown taxonomies are flat.
    fn is_hierarchical(&self, taxonomy: &str) -> Result<bool, TrailError>;

    /// Lookup a registered content type.
    fn content_type(&self, name: &str) -> Result<Option<ContentType>, TrailError>;

    /// Archive URL for a content type, `None` when the type has no archive.
    fn archive_link(&self, content_type: &str) -> Result<Option<String>, TrailError>;

    /// Permalink of an item, `None` when it cannot be resolved.
    fn permalink(&self, id: ItemId) -> Result<Option<String>, TrailError>;

    /// Archive URL of a term.
    fn term_link(&self, term: &Term) -> Result<Option<String>, TrailError>;

    /// Whether the current actor may read private items of this content type.
    fn can_read_private(&self, content_type: &str) -> Result<bool, TrailError>;

    /// URL of the month archive.
    fn month_link(&self, year: i32, month: u32) -> Result<String, TrailError>;

    /// Site home URL.
    fn home_url(&self) -> Result<String, TrailError>;
}

// =============================================================================
// SITEGRAPH IMPLEMENTATION
// =============================================================================

/// In-memory content graph.
///
/// Uses `BTreeMap` exclusively for deterministic ordering.
#[derive(Debug, Clone, Default)]
pub struct SiteGraph {
    /// Site root, stored without a trailing slash.
    home_url: String,

    /// Content types by name.
    content_types: BTreeMap<String, ContentTypeRecord>,

    /// Taxonomies by name.
    taxonomies: BTreeMap<String, TaxonomyRecord>,

    /// Items by id.
    items: BTreeMap<ItemId, ItemRecord>,

    /// Terms by id. Term ids are unique across taxonomies.
    terms: BTreeMap<TermId, TermRecord>,

    /// Content types whose private items the current actor may read.
    private_readers: BTreeSet<String>,
}

impl SiteGraph {
    /// Create an empty graph rooted at `home_url`.
    #[must_use]
    pub fn new(home_url: impl Into<String>) -> Self {
        Self {
            home_url: home_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Build and validate a graph from a fixture document.
    pub fn from_fixture(fixture: SiteFixture) -> Result<Self, TrailError> {
        let mut graph = Self::new(fixture.home_url);

        for record in fixture.content_types {
            graph.insert_content_type(record);
        }
        for record in fixture.taxonomies {
            graph.insert_taxonomy(record);
        }
        for record in fixture.terms {
            graph.insert_term(record)?;
        }
        for record in fixture.items {
            graph.insert_item(record)?;
        }
        for content_type in fixture.private_readers {
            graph.grant_private_read(content_type);
        }

        graph.validate()?;
        Ok(graph)
    }

    /// Register or replace a content type.
    pub fn insert_content_type(&mut self, record: ContentTypeRecord) {
        self.content_types.insert(record.name.clone(), record);
    }

    /// Register or replace a taxonomy.
    pub fn insert_taxonomy(&mut self, record: TaxonomyRecord) {
        self.taxonomies.insert(record.name.clone(), record);
    }

    /// Insert an item. Duplicate ids are rejected.
    pub fn insert_item(&mut self, record: ItemRecord) -> Result<(), TrailError> {
        if self.items.contains_key(&record.id) {
            return Err(TrailError::Fixture(format!(
                "duplicate item id {}",
                record.id.0
            )));
        }
        self.items.insert(record.id, record);
        Ok(())
    }

    /// Insert a term. Duplicate ids are rejected.
    pub fn insert_term(&mut self, record: TermRecord) -> Result<(), TrailError> {
        if self.terms.contains_key(&record.id) {
            return Err(TrailError::Fixture(format!(
                "duplicate term id {}",
                record.id.0
            )));
        }
        self.terms.insert(record.id, record);
        Ok(())
    }

    /// Allow the current actor to read private items of a content type.
    pub fn grant_private_read(&mut self, content_type: impl Into<String>) {
        self.private_readers.insert(content_type.into());
    }

    /// Number of items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of terms.
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Number of registered content types.
    #[must_use]
    pub fn content_type_count(&self) -> usize {
        self.content_types.len()
    }

    /// Check the invariants the engine relies on.
    ///
    /// - every non-zero parent and ancestor reference resolves
    /// - parent chains are acyclic
    /// - every term reference on an item resolves within its taxonomy
    pub fn validate(&self) -> Result<(), TrailError> {
        for (id, item) in &self.items {
            if !item.parent.is_none() && !self.items.contains_key(&item.parent) {
                return Err(TrailError::Fixture(format!(
                    "item {} has unknown parent {}",
                    id.0, item.parent.0
                )));
            }
            for ancestor in item.ancestors.iter().flatten() {
                if !self.items.contains_key(ancestor) {
                    return Err(TrailError::Fixture(format!(
                        "item {} has unknown ancestor {}",
                        id.0, ancestor.0
                    )));
                }
            }
            for (taxonomy, terms) in &item.terms {
                for term in terms {
                    if !self.terms.get(term).is_some_and(|t| &t.taxonomy == taxonomy) {
                        return Err(TrailError::Fixture(format!(
                            "item {} references unknown {} term {}",
                            id.0, taxonomy, term.0
                        )));
                    }
                }
            }

            // A chain longer than the item count must revisit an item.
            let mut steps = 0usize;
            let mut current = item.parent;
            while let Some(parent) = self.items.get(&current) {
                steps += 1;
                if steps > self.items.len() {
                    return Err(TrailError::Fixture(format!(
                        "item {} has a cyclic parent chain",
                        id.0
                    )));
                }
                current = parent.parent;
            }
        }

        for (id, term) in &self.terms {
            if !term.parent.is_root()
                && !self
                    .terms
                    .get(&term.parent)
                    .is_some_and(|p| p.taxonomy == term.taxonomy)
            {
                return Err(TrailError::Fixture(format!(
                    "term {} has unknown parent {}",
                    id.0, term.parent.0
                )));
            }

            let mut steps = 0usize;
            let mut current = term.parent;
            while let Some(parent) = self.terms.get(&current) {
                steps += 1;
                if steps > self.terms.len() {
                    return Err(TrailError::Fixture(format!(
                        "term {} has a cyclic parent chain",
                        id.0
                    )));
                }
                current = parent.parent;
            }
        }

        Ok(())
    }

    fn term_from_record(record: &TermRecord) -> Term {
        Term {
            id: record.id,
            taxonomy: record.taxonomy.clone(),
            parent: record.parent,
            name: record.name.clone(),
            order: record.order,
        }
    }

    /// `parent` and its ancestors, oldest first.
    fn item_ancestors(&self, parent: ItemId) -> Vec<ItemId> {
        let mut chain = Vec::new();
        let mut current = parent;
        while let Some(item) = self.items.get(&current) {
            if chain.len() == self.items.len() {
                break;
            }
            chain.push(item.id);
            current = item.parent;
        }
        chain.reverse();
        chain
    }

    /// Slugs from the root item down to `id`.
    fn item_path(&self, id: ItemId) -> Vec<&str> {
        let mut segments = Vec::new();
        let mut current = self.items.get(&id);
        while let Some(item) = current {
            segments.push(item.slug.as_str());
            current = self.items.get(&item.parent);
        }
        segments.reverse();
        segments
    }

    /// Slugs from the root term down to `id`.
    fn term_path(&self, id: TermId) -> Vec<&str> {
        let mut segments = Vec::new();
        let mut current = self.terms.get(&id);
        while let Some(term) = current {
            segments.push(term.slug.as_str());
            current = self.terms.get(&term.parent);
        }
        segments.reverse();
        segments
    }

    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.home_url.clone();
        for segment in segments.iter().filter(|s| !s.is_empty()) {
            url.push('/');
            url.push_str(segment);
        }
        url.push('/');
        url
    }
}

impl ContentGraph for SiteGraph {
    fn item(&self, id: ItemId) -> Result<Option<ContentItem>, TrailError> {
        Ok(self.items.get(&id).map(|record| ContentItem {
            id: record.id,
            content_type: record.content_type.clone(),
            parent: record.parent,
            ancestors: Some(
                record
                    .ancestors
                    .clone()
                    .unwrap_or_else(|| self.item_ancestors(record.parent)),
            ),
            title: record.title.clone(),
            visibility: record.visibility,
        }))
    }

    fn item_terms(&self, id: ItemId, taxonomy: &str) -> Result<Vec<Term>, TrailError> {
        let Some(ids) = self.items.get(&id).and_then(|item| item.terms.get(taxonomy)) else {
            return Ok(Vec::new());
        };

        Ok(ids
            .iter()
            .filter_map(|term_id| self.terms.get(term_id))
            .filter(|record| record.taxonomy == taxonomy)
            .map(Self::term_from_record)
            .collect())
    }

    fn term(&self, id: TermId, taxonomy: &str) -> Result<Option<Term>, TrailError> {
        Ok(self
            .terms
            .get(&id)
            .filter(|record| record.taxonomy == taxonomy)
            .map(Self::term_from_record))
    }

    fn is_hierarchical(&self, taxonomy: &str) -> Result<bool, TrailError> {
        Ok(self
            .taxonomies
            .get(taxonomy)
            .is_some_and(|record| record.hierarchical))
    }

    fn content_type(&self, name: &str) -> Result<Option<ContentType>, TrailError> {
        Ok(self.content_types.get(name).map(|record| ContentType {
            name: record.name.clone(),
            label: record.label.clone(),
            menu_name: record.menu_name.clone(),
        }))
    }

    fn archive_link(&self, content_type: &str) -> Result<Option<String>, TrailError> {
        Ok(self
            .content_types
            .get(content_type)
            .filter(|record| record.has_archive)
            .map(|record| {
                let slug = record.archive_slug.as_deref().unwrap_or(&record.name);
                self.url(&[slug])
            }))
    }

    fn permalink(&self, id: ItemId) -> Result<Option<String>, TrailError> {
        let Some(item) = self.items.get(&id) else {
            return Ok(None);
        };
        // Drafts have no public address yet.
        if item.visibility == Visibility::Draft {
            return Ok(None);
        }

        let mut segments: Vec<&str> = self
            .content_types
            .get(&item.content_type)
            .and_then(|record| record.rewrite_base.as_deref())
            .into_iter()
            .collect();
        segments.extend(self.item_path(id));
        Ok(Some(self.url(&segments)))
    }

    fn term_link(&self, term: &Term) -> Result<Option<String>, TrailError> {
        let Some(record) = self.terms.get(&term.id) else {
            return Ok(None);
        };

        let taxonomy = self.taxonomies.get(&record.taxonomy);
        let base = taxonomy
            .and_then(|t| t.base.as_deref())
            .unwrap_or(&record.taxonomy);

        let mut segments = vec![base];
        if taxonomy.is_some_and(|t| t.hierarchical) {
            segments.extend(self.term_path(term.id));
        } else {
            segments.push(record.slug.as_str());
        }
        Ok(Some(self.url(&segments)))
    }

    fn can_read_private(&self, content_type: &str) -> Result<bool, TrailError> {
        Ok(self.private_readers.contains(content_type))
    }

    fn month_link(&self, year: i32, month: u32) -> Result<String, TrailError> {
        Ok(format!("{}/{:04}/{:02}/", self.home_url, year, month))
    }

    fn home_url(&self) -> Result<String, TrailError> {
        Ok(format!("{}/", self.home_url))
    }
}

// =============================================================================
// TESTS
// =============================================================================
