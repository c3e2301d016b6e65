//! # Trail Module
//!
//! Per-request entry point. [`Breadcrumbs`] composes and resolves the trail
//! once, on first access, and serves every later call from the memoized
//! result.

use crate::compositor::compose;
use crate::config::ConfigProvider;
use crate::graph::ContentGraph;
use crate::hooks::Extensions;
use crate::resolver::resolve;
use crate::{Crumb, RequestContext, ResolvedCrumb, TrailError, TrailWarning};
use serde::Serialize;
use std::cell::OnceCell;

/// A composed and resolved trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trail {
    /// Abstract crumbs, after the trail hook.
    pub crumbs: Vec<Crumb>,
    /// Display-ready crumbs, one per abstract crumb.
    pub links: Vec<ResolvedCrumb>,
    pub warnings: Vec<TrailWarning>,
}

/// Build a trail in one go.
pub fn build_trail<G, C>(
    graph: &G,
    config: &C,
    context: &RequestContext,
    extensions: &Extensions,
) -> Result<Trail, TrailError>
where
    G: ContentGraph + ?Sized,
    C: ConfigProvider + ?Sized,
{
    let composition = compose(graph, config, context, extensions)?;
    let links = resolve(graph, config, &composition.crumbs, extensions)?;

    tracing::debug!(
        crumbs = composition.crumbs.len(),
        warnings = composition.warnings.len(),
        "trail built"
    );

    Ok(Trail {
        crumbs: composition.crumbs,
        links,
        warnings: composition.warnings,
    })
}

/// Memoized breadcrumbs of one request.
///
/// Create one per request; it is not meant to outlive the request or to be
/// shared between threads.
pub struct Breadcrumbs<'a, G: ?Sized, C: ?Sized> {
    graph: &'a G,
    config: &'a C,
    context: RequestContext,
    extensions: &'a Extensions,
    trail: OnceCell<Trail>,
}

impl<'a, G, C> Breadcrumbs<'a, G, C>
where
    G: ContentGraph + ?Sized,
    C: ConfigProvider + ?Sized,
{
    pub fn new(
        graph: &'a G,
        config: &'a C,
        context: RequestContext,
        extensions: &'a Extensions,
    ) -> Self {
        Self {
            graph,
            config,
            context,
            extensions,
            trail: OnceCell::new(),
        }
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// The full trail, built on first call.
    ///
    /// Errors are not memoized: a failed build is retried on the next call.
    pub fn trail(&self) -> Result<&Trail, TrailError> {
        if let Some(trail) = self.trail.get() {
            return Ok(trail);
        }
        let trail = build_trail(self.graph, self.config, &self.context, self.extensions)?;
        Ok(self.trail.get_or_init(|| trail))
    }

    /// Abstract crumbs of the trail.
    pub fn crumbs(&self) -> Result<&[Crumb], TrailError> {
        Ok(&self.trail()?.crumbs)
    }

    /// Display-ready crumbs of the trail.
    pub fn links(&self) -> Result<&[ResolvedCrumb], TrailError> {
        Ok(&self.trail()?.links)
    }

    pub fn warnings(&self) -> Result<&[TrailWarning], TrailError> {
        Ok(&self.trail()?.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::formats::{ContentTypeRecord, ItemRecord};
    use crate::graph::SiteGraph;
    use crate::hooks::HookOutput;
    use crate::{Classification, ItemId};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn site() -> SiteGraph {
        let mut graph = SiteGraph::new("https://example.com");
        graph.insert_content_type(ContentTypeRecord::new("page"));
        graph
            .insert_item(ItemRecord::new(1, "page", "about", "About"))
            .expect("item");
        graph
    }

    #[test]
    fn builds_links_for_singular() {
        let graph = site();
        let settings = Settings::default();
        let extensions = Extensions::default();
        let breadcrumbs =
            Breadcrumbs::new(&graph, &settings, RequestContext::singular(ItemId(1)), &extensions);

        let links = breadcrumbs.links().expect("links");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].text, "Home");
        assert_eq!(links[1].text, "About");
        assert_eq!(links[1].url.as_deref(), Some("https://example.com/about/"));
    }

    #[test]
    fn composition_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let extensions = Extensions::new().with_trail(move |crumbs| {
            counter.fetch_add(1, Ordering::SeqCst);
            HookOutput::Many(crumbs)
        });

        let graph = site();
        let settings = Settings::default();
        let breadcrumbs = Breadcrumbs::new(
            &graph,
            &settings,
            RequestContext::new(Classification::NotFound),
            &extensions,
        );

        let first = breadcrumbs.links().expect("links").to_vec();
        let second = breadcrumbs.links().expect("links").to_vec();
        breadcrumbs.crumbs().expect("crumbs");

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn errors_surface_from_every_accessor() {
        let graph = site();
        let settings = Settings::default();
        let extensions = Extensions::default();
        let breadcrumbs = Breadcrumbs::new(
            &graph,
            &settings,
            RequestContext::new(Classification::Singular),
            &extensions,
        );

        assert!(breadcrumbs.links().is_err());
        assert!(breadcrumbs.warnings().is_err());
    }
}
