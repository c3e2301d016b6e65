//! # Compositor Module
//!
//! Trail composition: decides which abstract crumbs form the trail.
//!
//! Composition runs two leading rules for every request (home crumb, blog
//! crumb) and then exactly one classification-specific rule. The result is a
//! list of [`Crumb`]s; labels and links are left to the resolver.

use crate::config::{ConfigProvider, FrontDisplay};
use crate::graph::ContentGraph;
use crate::hooks::Extensions;
use crate::primitives::{ANCESTORS_HOOK, BLOG_PARENT_SENTINEL, POST_TYPE, TRAIL_HOOK, is_set};
use crate::terms::{primary_term_trail, term_parents};
use crate::text::escape_html;
use crate::{
    Classification, ContentItem, Crumb, DateArchive, ItemId, RequestContext, TermId, TrailError,
    TrailWarning,
};
use chrono::{Datelike, Month, NaiveDate};
use std::fmt::Write;

/// Output of trail composition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    pub crumbs: Vec<Crumb>,
    pub warnings: Vec<TrailWarning>,
}

/// The Compositor builds the abstract crumb list for one request.
pub struct Compositor<'a, G: ?Sized, C: ?Sized> {
    graph: &'a G,
    config: &'a C,
    extensions: &'a Extensions,
    crumbs: Vec<Crumb>,
    warnings: Vec<TrailWarning>,
}

impl<'a, G, C> Compositor<'a, G, C>
where
    G: ContentGraph + ?Sized,
    C: ConfigProvider + ?Sized,
{
    /// Create a compositor over the given collaborators.
    pub fn new(graph: &'a G, config: &'a C, extensions: &'a Extensions) -> Self {
        Self {
            graph,
            config,
            extensions,
            crumbs: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Compose the crumb list for a request.
    pub fn compose(mut self, context: &RequestContext) -> Result<Composition, TrailError> {
        let current = match context.current_item {
            Some(id) => Some(
                self.graph
                    .item(id)?
                    .ok_or(TrailError::ItemNotFound(id))?,
            ),
            None => None,
        };

        self.maybe_add_home_crumb()?;
        self.maybe_add_blog_crumb(&context.classification, current.as_ref());

        match &context.classification {
            Classification::Home => {}
            Classification::BlogIndex => {
                // With a posts front page the blog index is the front page.
                if self.config.front_display() == FrontDisplay::StaticPage {
                    self.add_blog_crumb();
                }
            }
            Classification::Singular => {
                let item = current.ok_or_else(|| {
                    TrailError::InvalidState(
                        "singular request without a resolvable current item".to_string(),
                    )
                })?;
                self.add_crumbs_for_item(&item)?;
            }
            Classification::ContentTypeArchive { content_type } => {
                if let Some(content_type) = content_type.as_deref().filter(|t| !t.is_empty()) {
                    self.add_archive_crumb(content_type);
                }
            }
            Classification::TermArchive { term, taxonomy } => {
                self.add_crumbs_for_term(*term, taxonomy)?;
            }
            Classification::DateArchive { archive } => self.add_date_crumbs(*archive)?,
            Classification::Author { display_name } => {
                let text = format!("{} {}", self.config.archive_prefix(), display_name);
                self.crumbs.push(Crumb::label(text, true));
            }
            Classification::Search { query } => {
                let text = format!(
                    "{} \"{}\"",
                    self.config.search_prefix(),
                    escape_html(query)
                );
                self.crumbs.push(Crumb::label(text, true));
            }
            Classification::NotFound => {
                self.crumbs
                    .push(Crumb::label(self.config.not_found_label(), true));
            }
        }

        let mut crumbs = std::mem::take(&mut self.crumbs);
        if let Some(hook) = &self.extensions.trail {
            crumbs = hook(crumbs).into_list(TRAIL_HOOK, &mut self.warnings);
        }

        Ok(Composition {
            crumbs,
            warnings: self.warnings,
        })
    }

    // =========================================================================
    // LEADING CRUMBS
    // =========================================================================

    fn maybe_add_home_crumb(&mut self) -> Result<(), TrailError> {
        let config = self.config;
        let label = config.home_label();
        if !label.is_empty() {
            let url = self.graph.home_url()?;
            self.crumbs.push(Crumb::linked(label, url, true));
        }
        Ok(())
    }

    fn maybe_add_blog_crumb(
        &mut self,
        classification: &Classification,
        current: Option<&ContentItem>,
    ) {
        let is_post = current.is_some_and(|item| item.content_type == POST_TYPE);
        let excluded = matches!(
            classification,
            Classification::BlogIndex | Classification::Search { .. }
        );

        if self.config.front_display() == FrontDisplay::StaticPage
            && is_post
            && !excluded
            && self.config.display_blog_crumb()
        {
            self.add_blog_crumb();
        }
    }

    /// Add the blog index page, when one is configured.
    fn add_blog_crumb(&mut self) {
        match self.config.blog_page() {
            Some(page) => self.crumbs.push(Crumb::Item { id: page }),
            None => tracing::debug!("no blog page configured, skipping blog crumb"),
        }
    }

    fn add_archive_crumb(&mut self, content_type: &str) {
        self.crumbs.push(Crumb::Archive {
            content_type: content_type.to_string(),
        });
    }

    // =========================================================================
    // SINGULAR
    // =========================================================================

    fn add_crumbs_for_item(&mut self, item: &ContentItem) -> Result<(), TrailError> {
        if item.content_type != POST_TYPE && self.graph.archive_link(&item.content_type)?.is_some()
        {
            self.add_archive_crumb(&item.content_type);
        }

        if item.parent.is_none() {
            for term in primary_term_trail(self.graph, self.config, item)? {
                self.crumbs.push(Crumb::Term { term });
            }
        } else {
            for id in self.ancestors(item) {
                self.crumbs.push(Crumb::Item { id });
            }
        }

        self.crumbs.push(Crumb::Item { id: item.id });
        Ok(())
    }

    /// Ancestors of an item, oldest first, after the ancestors hook.
    ///
    /// Without an ancestor chain from the graph only the direct parent is used.
    fn ancestors(&mut self, item: &ContentItem) -> Vec<ItemId> {
        let ancestors = match &item.ancestors {
            Some(ancestors) => ancestors.clone(),
            None => vec![item.parent],
        };

        match &self.extensions.ancestors {
            Some(hook) => hook(ancestors).into_list(ANCESTORS_HOOK, &mut self.warnings),
            None => ancestors,
        }
    }

    // =========================================================================
    // TERM ARCHIVES
    // =========================================================================

    fn add_crumbs_for_term(
        &mut self,
        term_id: TermId,
        taxonomy: &str,
    ) -> Result<(), TrailError> {
        let term = self
            .graph
            .term(term_id, taxonomy)?
            .ok_or_else(|| TrailError::TermNotFound(term_id, taxonomy.to_string()))?;

        let config = self.config;
        if let Some(parent) = config.preferred_parent(taxonomy).filter(|p| is_set(p)) {
            if parent == BLOG_PARENT_SENTINEL && config.front_display() == FrontDisplay::StaticPage
            {
                self.add_blog_crumb();
            } else {
                self.add_archive_crumb(parent);
            }
        }

        if self.graph.is_hierarchical(taxonomy)? && !term.parent.is_root() {
            for parent in term_parents(self.graph, &term)? {
                self.crumbs.push(Crumb::Term { term: parent });
            }
        }

        self.crumbs.push(Crumb::Term { term });
        Ok(())
    }

    // =========================================================================
    // DATE ARCHIVES
    // =========================================================================

    fn add_date_crumbs(&mut self, archive: DateArchive) -> Result<(), TrailError> {
        let config = self.config;
        let prefix = config.archive_prefix();
        match archive {
            DateArchive::Day { date } => {
                let month = month_name(date.month())?;
                let url = self.graph.month_link(date.year(), date.month())?;
                self.crumbs
                    .push(Crumb::linked(format!("{} {}", month, date.year()), url, false));

                let day = format_date(date, config.date_format())?;
                self.crumbs
                    .push(Crumb::label(format!("{} {}", prefix, escape_html(&day)), false));
            }
            DateArchive::Month { year, month } => {
                let title = format!("{} {}", month_name(month)?, year);
                self.crumbs
                    .push(Crumb::label(format!("{} {}", prefix, escape_html(&title)), true));
            }
            DateArchive::Year { year } => {
                self.crumbs
                    .push(Crumb::label(format!("{} {}", prefix, year), true));
            }
        }
        Ok(())
    }
}

fn month_name(month: u32) -> Result<&'static str, TrailError> {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .ok_or_else(|| TrailError::InvalidState(format!("month {} out of range", month)))
}

fn format_date(date: NaiveDate, format: &str) -> Result<String, TrailError> {
    let mut out = String::new();
    write!(out, "{}", date.format(format))
        .map_err(|_| TrailError::Config(format!("invalid date format '{}'", format)))?;
    Ok(out)
}

/// Compose the crumb list for a request.
pub fn compose<G, C>(
    graph: &G,
    config: &C,
    context: &RequestContext,
    extensions: &Extensions,
) -> Result<Composition, TrailError>
where
    G: ContentGraph + ?Sized,
    C: ConfigProvider + ?Sized,
{
    Compositor::new(graph, config, extensions).compose(context)
}

// =============================================================================
// TESTS
// =============================================================================
