//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::{PageKind, TrailArgs};
use std::path::Path;
use trailcrumb_core::{
    Breadcrumbs, Classification, DateArchive, Extensions, ItemId, RequestContext, ResolvedCrumb,
    TermId, TrailError,
};
use trailcrumb::api;
use trailcrumb::site::{MAX_SMALL_FILE_SIZE, Site, read_input_file};

/// Separator between crumbs in text output.
const SEPARATOR: &str = " › ";

// =============================================================================
// TRAIL COMMAND
// =============================================================================

/// Print the trail for one request.
pub fn cmd_trail(
    site_path: &Path,
    settings_path: &Path,
    json_mode: bool,
    verbose: bool,
    args: &TrailArgs,
) -> Result<(), TrailError> {
    let site = Site::load(site_path, Some(settings_path))?;
    let context = request_context(args)?;

    let extensions = Extensions::default();
    let breadcrumbs = Breadcrumbs::new(&site.graph, &site.settings, context, &extensions);
    let trail = breadcrumbs.trail()?;

    if json_mode {
        let output = serde_json::json!({
            "context": breadcrumbs.context(),
            "crumbs": trail.links,
            "warnings": trail.warnings.iter().map(ToString::to_string).collect::<Vec<_>>(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{}", render_text(&trail.links));

    if verbose {
        println!();
        for (index, link) in trail.links.iter().enumerate() {
            match link.url.as_deref().filter(|u| !u.is_empty()) {
                Some(url) => println!("  {}. {} <{}>", index, link.text, url),
                None => println!("  {}. {}", index, link.text),
            }
        }
    }
    for warning in &trail.warnings {
        eprintln!("warning: {}", warning);
    }

    Ok(())
}

/// Join crumb labels into a single line.
pub fn render_text(links: &[ResolvedCrumb]) -> String {
    links
        .iter()
        .map(|link| link.text.as_str())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Build the request context from a request file or the inline flags.
pub fn request_context(args: &TrailArgs) -> Result<RequestContext, TrailError> {
    if let Some(path) = &args.request {
        let json = read_input_file(path, MAX_SMALL_FILE_SIZE)?;
        return serde_json::from_str(&json)
            .map_err(|e| TrailError::Io(format!("Invalid request file: {}", e)));
    }

    let kind = args
        .kind
        .ok_or_else(|| missing("either --request or --kind"))?;

    let classification = match kind {
        PageKind::Home => Classification::Home,
        PageKind::BlogIndex => Classification::BlogIndex,
        PageKind::Singular => {
            if args.item.is_none() {
                return Err(missing("--item"));
            }
            Classification::Singular
        }
        PageKind::Archive => Classification::ContentTypeArchive {
            content_type: args.content_type.clone(),
        },
        PageKind::Term => Classification::TermArchive {
            term: TermId(args.term.ok_or_else(|| missing("--term"))?),
            taxonomy: args
                .taxonomy
                .clone()
                .ok_or_else(|| missing("--taxonomy"))?,
        },
        PageKind::Day => Classification::DateArchive {
            archive: DateArchive::Day {
                date: args.date.ok_or_else(|| missing("--date"))?,
            },
        },
        PageKind::Month => Classification::DateArchive {
            archive: DateArchive::Month {
                year: args.year.ok_or_else(|| missing("--year"))?,
                month: args.month.ok_or_else(|| missing("--month"))?,
            },
        },
        PageKind::Year => Classification::DateArchive {
            archive: DateArchive::Year {
                year: args.year.ok_or_else(|| missing("--year"))?,
            },
        },
        PageKind::Author => Classification::Author {
            display_name: args.author.clone().ok_or_else(|| missing("--author"))?,
        },
        PageKind::Search => Classification::Search {
            query: args.query.clone().unwrap_or_default(),
        },
        PageKind::NotFound => Classification::NotFound,
    };

    let mut context = RequestContext::new(classification);
    if let Some(item) = args.item {
        context = context.with_current_item(ItemId(item));
    }
    Ok(context)
}

fn missing(flag: &str) -> TrailError {
    TrailError::InvalidState(format!("{} is required for this page kind", flag))
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Load the site and report what it holds.
pub fn cmd_check(site_path: &Path, settings_path: &Path, json_mode: bool) -> Result<(), TrailError> {
    let site = Site::load(site_path, Some(settings_path))?;
    let graph = &site.graph;

    if json_mode {
        let output = serde_json::json!({
            "site": site_path.to_string_lossy(),
            "settings": settings_path.to_string_lossy(),
            "item_count": graph.item_count(),
            "term_count": graph.term_count(),
            "content_type_count": graph.content_type_count(),
            "front_display": site.settings.front_display,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Trailcrumb Site Check");
    println!("=====================");
    println!("Site:     {:?}", site_path);
    println!("Settings: {:?}", settings_path);
    println!();
    println!("Items:         {}", graph.item_count());
    println!("Terms:         {}", graph.term_count());
    println!("Content Types: {}", graph.content_type_count());

    Ok(())
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_serve(
    site_path: &Path,
    settings_path: &Path,
    host: &str,
    port: u16,
) -> Result<(), TrailError> {
    let site = Site::load(site_path, Some(settings_path))?;

    println!("Trailcrumb Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", host);
    println!("  Port:     {}", port);
    println!("  Site:     {:?}", site_path);
    println!("  Settings: {:?}", settings_path);
    println!();
    println!("Endpoints:");
    println!("  POST /trail  - Resolve a trail");
    println!("  GET  /status - Site summary");
    println!("  GET  /health - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, site).await
}

// =============================================================================
// TESTS
// =============================================================================
