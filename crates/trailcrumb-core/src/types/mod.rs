//! # Core Type Definitions
//!
//! This module contains all core types for the Trailcrumb breadcrumb engine:
//! - Content identifiers (`ItemId`, `TermId`)
//! - Content graph records (`ContentItem`, `Term`, `ContentType`, `Visibility`)
//! - Request classification (`Classification`, `DateArchive`, `RequestContext`)
//! - Trail structures (`Crumb`, `ResolvedCrumb`)
//! - Error and warning types (`TrailError`, `TrailWarning`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer identifiers only
//! - Implement `Ord` where they are used as `BTreeMap` keys
//! - Preserve insertion order wherever an order is observable

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of a content item (page, post, custom type entry).
///
/// `ItemId(0)` is the "no parent" marker.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct ItemId(pub u64);

impl ItemId {
    /// The "no item" marker used for root items.
    pub const NONE: Self = Self(0);

    /// Returns true for the "no item" marker.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Identifier of a taxonomy term.
///
/// `TermId(0)` is the "root" marker used as parent of top-level terms.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct TermId(pub u64);

impl TermId {
    /// The "no parent" marker for top-level terms.
    pub const ROOT: Self = Self(0);

    /// Returns true for the root marker.
    #[must_use]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// CONTENT GRAPH RECORDS
// =============================================================================

/// Publication state of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Publish,
    Private,
    Draft,
    Other,
}

/// A single content item as seen by the breadcrumb engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ItemId,
    pub content_type: String,
    /// Direct parent, `ItemId::NONE` for root items.
    pub parent: ItemId,
    /// Full ancestor chain, oldest first, when the host knows it.
    pub ancestors: Option<Vec<ItemId>>,
    /// Raw title; may contain markup.
    pub title: String,
    pub visibility: Visibility,
}

/// A taxonomy term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: TermId,
    pub taxonomy: String,
    /// Parent term, `TermId::ROOT` for top-level terms.
    pub parent: TermId,
    pub name: String,
    /// Positional order, only consulted when breaking ties between root ancestors.
    pub order: Option<i64>,
}

/// Registered content type metadata used for archive labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentType {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub menu_name: String,
}

// =============================================================================
// REQUEST CLASSIFICATION
// =============================================================================

/// Date archive granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "period", rename_all = "snake_case")]
pub enum DateArchive {
    Day { date: NaiveDate },
    Month { year: i32, month: u32 },
    Year { year: i32 },
}

/// What kind of page is being rendered. Exactly one holds per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    Home,
    BlogIndex,
    Singular,
    ContentTypeArchive {
        #[serde(default)]
        content_type: Option<String>,
    },
    TermArchive {
        term: TermId,
        taxonomy: String,
    },
    DateArchive {
        archive: DateArchive,
    },
    Author {
        display_name: String,
    },
    Search {
        query: String,
    },
    NotFound,
}

/// Everything the engine knows about the current request.
///
/// `current_item` is the item the host considers "current": the rendered
/// item for `Singular`, otherwise whatever item the listing is positioned on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(flatten)]
    pub classification: Classification,
    #[serde(default)]
    pub current_item: Option<ItemId>,
}

impl RequestContext {
    /// Create a context with no current item.
    #[must_use]
    pub fn new(classification: Classification) -> Self {
        Self {
            classification,
            current_item: None,
        }
    }

    /// Create a context for a singular item.
    #[must_use]
    pub fn singular(item: ItemId) -> Self {
        Self {
            classification: Classification::Singular,
            current_item: Some(item),
        }
    }

    /// Attach the current item.
    #[must_use]
    pub fn with_current_item(mut self, item: ItemId) -> Self {
        self.current_item = Some(item);
        self
    }
}

// =============================================================================
// CRUMBS
// =============================================================================

/// An abstract crumb produced by composition, before labels and links exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Crumb {
    Item { id: ItemId },
    Term { term: Term },
    Archive { content_type: String },
    Literal {
        text: String,
        url: Option<String>,
        allow_html: bool,
    },
}

impl Crumb {
    /// Literal crumb with a link.
    #[must_use]
    pub fn linked(text: impl Into<String>, url: impl Into<String>, allow_html: bool) -> Self {
        Self::Literal {
            text: text.into(),
            url: Some(url.into()),
            allow_html,
        }
    }

    /// Literal crumb rendered as plain label.
    #[must_use]
    pub fn label(text: impl Into<String>, allow_html: bool) -> Self {
        Self::Literal {
            text: text.into(),
            url: None,
            allow_html,
        }
    }
}

/// A crumb ready for display.
///
/// An absent or empty `url` means "label only".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCrumb {
    pub text: String,
    pub url: Option<String>,
    pub allow_html: bool,
}

impl ResolvedCrumb {
    /// Returns true when the crumb should render as a link.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while building a trail.
///
/// - No silent failures
/// - Use `Result<T, TrailError>` for fallible operations
/// - Collaborator contract violations surface as `InvalidState`
#[derive(Debug, Error)]
pub enum TrailError {
    /// The collaborators disagree with the classification they supplied.
    #[error("Invalid request state: {0}")]
    InvalidState(String),

    /// A referenced content item does not exist in the content graph.
    #[error("Item not found: {0:?}")]
    ItemNotFound(ItemId),

    /// A referenced term does not exist in the given taxonomy.
    #[error("Term not found: {0:?} in taxonomy '{1}'")]
    TermNotFound(TermId, String),

    /// Settings could not be parsed or hold an unusable value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A site fixture is malformed or violates graph invariants.
    #[error("Site fixture error: {0}")]
    Fixture(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

/// A recoverable problem noticed while building a trail.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TrailWarning {
    /// An extension hook returned something other than a list; it was coerced.
    #[error("The return value of the '{hook}' hook should be a list; coerced to {len} element(s)")]
    NonSequenceHookOutput { hook: String, len: usize },
}

// =============================================================================
// TESTS
// =============================================================================
