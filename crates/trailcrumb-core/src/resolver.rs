//! # Resolver Module
//!
//! Turns abstract crumbs into display-ready [`ResolvedCrumb`]s.
//!
//! | Crumb     | Text                                              | Link              |
//! |-----------|---------------------------------------------------|-------------------|
//! | `Item`    | title override, else title with markup removed    | permalink         |
//! | `Term`    | title override, else term name                    | term link         |
//! | `Archive` | title override, else label, menu name, type name  | archive link      |
//! | `Literal` | as given                                          | as given          |
//!
//! Private items the actor may not read keep their label but lose the link.

use crate::config::ConfigProvider;
use crate::graph::ContentGraph;
use crate::hooks::Extensions;
use crate::text::strip_tags;
use crate::{Crumb, ItemId, ResolvedCrumb, Term, TrailError, Visibility};

/// Resolve every crumb of a composed list, then apply the link hook.
pub fn resolve<G, C>(
    graph: &G,
    config: &C,
    crumbs: &[Crumb],
    extensions: &Extensions,
) -> Result<Vec<ResolvedCrumb>, TrailError>
where
    G: ContentGraph + ?Sized,
    C: ConfigProvider + ?Sized,
{
    let mut resolved = Vec::with_capacity(crumbs.len());
    for (index, crumb) in crumbs.iter().enumerate() {
        let link = resolve_crumb(graph, config, crumb)?;
        let link = match extensions.link.as_deref() {
            Some(hook) => hook(link, index, crumbs),
            None => link,
        };
        resolved.push(link);
    }
    Ok(resolved)
}

/// Resolve a single crumb.
pub fn resolve_crumb<G, C>(graph: &G, config: &C, crumb: &Crumb) -> Result<ResolvedCrumb, TrailError>
where
    G: ContentGraph + ?Sized,
    C: ConfigProvider + ?Sized,
{
    match crumb {
        Crumb::Item { id } => item_link(graph, config, *id),
        Crumb::Term { term } => term_link(graph, config, term),
        Crumb::Archive { content_type } => archive_link(graph, config, content_type),
        Crumb::Literal {
            text,
            url,
            allow_html,
        } => Ok(ResolvedCrumb {
            text: text.clone(),
            url: url.clone(),
            allow_html: *allow_html,
        }),
    }
}

fn item_link<G, C>(graph: &G, config: &C, id: ItemId) -> Result<ResolvedCrumb, TrailError>
where
    G: ContentGraph + ?Sized,
    C: ConfigProvider + ?Sized,
{
    let Some(item) = graph.item(id)? else {
        tracing::debug!(item = id.0, "unknown item, resolving to an unlinked crumb");
        return Ok(ResolvedCrumb {
            text: config.item_title(id).unwrap_or_default().to_string(),
            url: Some(String::new()),
            allow_html: false,
        });
    };

    let hidden = item.visibility == Visibility::Private
        && graph.content_type(&item.content_type)?.is_some()
        && !graph.can_read_private(&item.content_type)?;

    let url = if hidden {
        tracing::debug!(item = id.0, "private item, suppressing link");
        String::new()
    } else {
        graph.permalink(id)?.unwrap_or_default()
    };

    let text = match config.item_title(id) {
        Some(title) => title.to_string(),
        None => strip_tags(&item.title),
    };

    Ok(ResolvedCrumb {
        text,
        url: Some(url),
        allow_html: false,
    })
}

fn term_link<G, C>(graph: &G, config: &C, term: &Term) -> Result<ResolvedCrumb, TrailError>
where
    G: ContentGraph + ?Sized,
    C: ConfigProvider + ?Sized,
{
    let text = config
        .term_title(term.id, &term.taxonomy)
        .unwrap_or(&term.name)
        .to_string();

    Ok(ResolvedCrumb {
        text,
        url: graph.term_link(term)?,
        allow_html: false,
    })
}

fn archive_link<G, C>(graph: &G, config: &C, content_type: &str) -> Result<ResolvedCrumb, TrailError>
where
    G: ContentGraph + ?Sized,
    C: ConfigProvider + ?Sized,
{
    let text = match config.archive_title(content_type) {
        Some(title) => title.to_string(),
        None => match graph.content_type(content_type)? {
            Some(record) => [record.label, record.menu_name]
                .into_iter()
                .find(|name| !name.is_empty())
                .unwrap_or(record.name),
            None => {
                tracing::debug!(content_type, "unknown content type, using identifier as label");
                content_type.to_string()
            }
        },
    };

    Ok(ResolvedCrumb {
        text,
        url: graph.archive_link(content_type)?,
        allow_html: false,
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::formats::{ContentTypeRecord, ItemRecord, TaxonomyRecord, TermRecord};
    use crate::graph::SiteGraph;
    use crate::TermId;

    fn site() -> SiteGraph {
        let mut graph = SiteGraph::new("https://example.com");
        graph.insert_content_type(ContentTypeRecord::new("page").with_label("Pages"));
        graph.insert_content_type(
            ContentTypeRecord::new("book")
                .with_label("Books")
                .with_archive(),
        );
        graph.insert_content_type(ContentTypeRecord::new("album").with_menu_name("Albums"));
        graph.insert_content_type(ContentTypeRecord::new("recipe"));
        graph.insert_taxonomy(TaxonomyRecord::new("genre", false));
        graph
            .insert_term(TermRecord::new(5, "genre", "sci-fi", "Sci-Fi"))
            .expect("term");
        for item in [
            ItemRecord::new(1, "page", "about", "<em>About</em> us"),
            ItemRecord::new(2, "page", "secret", "Secret").with_visibility(Visibility::Private),
            ItemRecord::new(3, "page", "wip", "Draft").with_visibility(Visibility::Draft),
        ] {
            graph.insert_item(item).expect("item");
        }
        graph
    }

    fn one(graph: &SiteGraph, settings: &Settings, crumb: Crumb) -> ResolvedCrumb {
        resolve_crumb(graph, settings, &crumb).expect("resolve")
    }

    #[test]
    fn item_title_is_stripped() {
        let link = one(&site(), &Settings::default(), Crumb::Item { id: ItemId(1) });
        assert_eq!(link.text, "About us");
        assert_eq!(link.url.as_deref(), Some("https://example.com/about/"));
        assert!(!link.allow_html);
    }

    #[test]
    fn item_title_override() {
        let mut settings = Settings::default();
        settings
            .item_titles
            .insert("1".to_string(), "Who we are".to_string());
        let link = one(&site(), &settings, Crumb::Item { id: ItemId(1) });
        assert_eq!(link.text, "Who we are");
    }

    #[test]
    fn private_item_link_is_suppressed() {
        let link = one(&site(), &Settings::default(), Crumb::Item { id: ItemId(2) });
        assert_eq!(link.text, "Secret");
        assert_eq!(link.url.as_deref(), Some(""));
        assert!(!link.is_linked());

        let mut graph = site();
        graph.grant_private_read("page");
        let link = one(&graph, &Settings::default(), Crumb::Item { id: ItemId(2) });
        assert!(link.is_linked());
    }

    #[test]
    fn item_without_permalink_has_empty_url() {
        let link = one(&site(), &Settings::default(), Crumb::Item { id: ItemId(3) });
        assert_eq!(link.url.as_deref(), Some(""));
    }

    #[test]
    fn unknown_item_resolves_unlinked() {
        let link = one(&site(), &Settings::default(), Crumb::Item { id: ItemId(99) });
        assert_eq!(link.text, "");
        assert_eq!(link.url.as_deref(), Some(""));
        assert!(!link.allow_html);

        let mut settings = Settings::default();
        settings
            .item_titles
            .insert("99".to_string(), "Moved".to_string());
        let link = one(&site(), &settings, Crumb::Item { id: ItemId(99) });
        assert_eq!(link.text, "Moved");
        assert!(!link.is_linked());
    }

    #[test]
    fn term_label_and_override() {
        let graph = site();
        let term = graph.term(TermId(5), "genre").expect("query").expect("term");
        let link = one(&graph, &Settings::default(), Crumb::Term { term: term.clone() });
        assert_eq!(link.text, "Sci-Fi");
        assert_eq!(link.url.as_deref(), Some("https://example.com/genre/sci-fi/"));

        let mut settings = Settings::default();
        settings
            .term_titles
            .entry("genre".to_string())
            .or_default()
            .insert("5".to_string(), "Science Fiction".to_string());
        let link = one(&graph, &settings, Crumb::Term { term });
        assert_eq!(link.text, "Science Fiction");
    }

    #[test]
    fn archive_label_fallbacks() {
        let graph = site();
        let archive = |name: &str| Crumb::Archive {
            content_type: name.to_string(),
        };

        let link = one(&graph, &Settings::default(), archive("book"));
        assert_eq!(link.text, "Books");
        assert_eq!(link.url.as_deref(), Some("https://example.com/book/"));

        assert_eq!(one(&graph, &Settings::default(), archive("album")).text, "Albums");

        let bare = one(&graph, &Settings::default(), archive("recipe"));
        assert_eq!(bare.text, "recipe");
        assert_eq!(bare.url, None);

        let unknown = one(&graph, &Settings::default(), archive("gadget"));
        assert_eq!(unknown.text, "gadget");
        assert_eq!(unknown.url, None);

        let mut settings = Settings::default();
        settings
            .archive_titles
            .insert("book".to_string(), "Library".to_string());
        assert_eq!(one(&graph, &settings, archive("book")).text, "Library");
    }

    #[test]
    fn literal_passes_through() {
        let crumb = Crumb::linked("Home", "https://example.com/", true);
        let link = one(&site(), &Settings::default(), crumb);
        assert_eq!(
            link,
            ResolvedCrumb {
                text: "Home".to_string(),
                url: Some("https://example.com/".to_string()),
                allow_html: true,
            }
        );
    }

    #[test]
    fn link_hook_sees_index_and_list() {
        let crumbs = vec![
            Crumb::linked("Home", "https://example.com/", true),
            Crumb::Item { id: ItemId(1) },
        ];
        let extensions = Extensions::new().with_link(|mut link, index, all| {
            if index + 1 == all.len() {
                link.url = None;
            }
            link
        });
        let links = resolve(&site(), &Settings::default(), &crumbs, &extensions).expect("resolve");
        assert!(links[0].is_linked());
        assert_eq!(links[1].url, None);
    }
}
