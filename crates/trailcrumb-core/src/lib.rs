//! # trailcrumb-core
//!
//! The deterministic breadcrumb engine for Trailcrumb.
//!
//! Given a page classification, a content graph and site configuration, the
//! engine produces the ordered trail of crumbs leading from the site root to
//! the page being rendered.
//!
//! ## Pipeline
//!
//! 1. `compositor` decides which abstract crumbs form the trail
//! 2. `resolver` turns each abstract crumb into display text and a link
//! 3. `trail` memoizes both steps for the lifetime of one request
//!
//! ## Architectural Constraints
//!
//! - Collaborators (`ContentGraph`, `ConfigProvider`) are read-only
//! - No process-wide state: every request gets its own `Breadcrumbs`
//! - Has NO async, NO network dependencies (pure Rust)
//! - Emits `tracing` events but never installs a subscriber

// =============================================================================
// MODULES
// =============================================================================

pub mod compositor;
pub mod config;
pub mod formats;
pub mod graph;
pub mod hooks;
pub mod primitives;
pub mod resolver;
pub mod terms;
pub mod text;
pub mod trail;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Classification, ContentItem, ContentType, Crumb, DateArchive, ItemId, RequestContext,
    ResolvedCrumb, Term, TermId, TrailError, TrailWarning, Visibility,
};

// =============================================================================
// RE-EXPORTS: Trail Engine
// =============================================================================

pub use compositor::{Composition, Compositor, compose};
pub use config::{ConfigProvider, FrontDisplay, Settings};
pub use graph::{ContentGraph, SiteGraph};
pub use hooks::{Extensions, HookOutput};
pub use resolver::{resolve, resolve_crumb};
pub use terms::{find_deepest_term, primary_term_trail, term_parents};
pub use trail::{Breadcrumbs, Trail, build_trail};

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{SiteFixture, load_site, site_from_json};
