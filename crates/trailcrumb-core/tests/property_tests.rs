//! # Property-Based Tests
//!
//! Determinism and ordering invariants of trail construction.

use proptest::collection::vec;
use proptest::prelude::*;
use trailcrumb_core::formats::{ContentTypeRecord, ItemRecord, TaxonomyRecord, TermRecord};
use trailcrumb_core::{
    Breadcrumbs, Classification, ContentGraph, Extensions, ItemId, RequestContext, Settings,
    SiteGraph, TermId, build_trail, find_deepest_term,
};

/// A chain of pages 1 -> 2 -> ... -> depth.
fn page_chain(depth: u64) -> SiteGraph {
    let mut graph = SiteGraph::new("https://example.com");
    graph.insert_content_type(ContentTypeRecord::new("page"));
    for id in 1..=depth {
        let mut record = ItemRecord::new(id, "page", format!("p{}", id), format!("Page {}", id));
        if id > 1 {
            record = record.with_parent(id - 1);
        }
        graph.insert_item(record).expect("item");
    }
    graph
}

/// A forest of two-level category trees, one per `(order, has_child)` entry.
fn term_forest(roots: &[(Option<i64>, bool)]) -> SiteGraph {
    let mut graph = SiteGraph::new("https://example.com");
    graph.insert_taxonomy(TaxonomyRecord::new("category", true));
    for (index, (order, has_child)) in roots.iter().enumerate() {
        let root = (index as u64 + 1) * 100;
        let mut record = TermRecord::new(root, "category", format!("r{}", root), "Root");
        if let Some(order) = order {
            record = record.with_order(*order);
        }
        graph.insert_term(record).expect("term");
        if *has_child {
            graph
                .insert_term(
                    TermRecord::new(root + 1, "category", format!("c{}", root), "Child")
                        .with_parent(root),
                )
                .expect("term");
        }
    }
    graph
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Building the same trail twice yields identical output.
    #[test]
    fn trail_is_deterministic(depth in 1u64..30, target in 1u64..30) {
        let target = target.min(depth);
        let graph = page_chain(depth);
        let settings = Settings::default();
        let context = RequestContext::singular(ItemId(target));

        let first = build_trail(&graph, &settings, &context, &Extensions::default()).expect("trail");
        let second = build_trail(&graph, &settings, &context, &Extensions::default()).expect("trail");
        prop_assert_eq!(first, second);
    }

    /// A nested page lists home, every ancestor oldest first, then itself.
    #[test]
    fn ancestors_are_ordered(depth in 1u64..30) {
        let graph = page_chain(depth);
        let settings = Settings::default();
        let extensions = Extensions::default();
        let breadcrumbs =
            Breadcrumbs::new(&graph, &settings, RequestContext::singular(ItemId(depth)), &extensions);

        let links = breadcrumbs.links().expect("links");
        prop_assert_eq!(links.len() as u64, depth + 1);
        prop_assert_eq!(links[0].text.as_str(), "Home");
        for (index, link) in links.iter().enumerate().skip(1) {
            prop_assert_eq!(link.text.clone(), format!("Page {}", index));
        }
    }

    /// Home leads every trail, and memoized reads agree with each other.
    #[test]
    fn home_leads_and_reads_agree(kind in 0usize..4, query in "[a-z ]{0,12}") {
        let classification = match kind {
            0 => Classification::Home,
            1 => Classification::NotFound,
            2 => Classification::Search { query },
            _ => Classification::Author { display_name: query },
        };
        let graph = page_chain(1);
        let settings = Settings::default();
        let extensions = Extensions::default();
        let breadcrumbs =
            Breadcrumbs::new(&graph, &settings, RequestContext::new(classification), &extensions);

        let first = breadcrumbs.links().expect("links").to_vec();
        let second = breadcrumbs.links().expect("links").to_vec();
        prop_assert_eq!(first[0].text.as_str(), "Home");
        prop_assert_eq!(first, second);
    }

    /// The deepest term does not depend on input order among deeper leaves
    /// with distinct root orders.
    #[test]
    fn deepest_term_prefers_low_root_order(orders in vec(0i64..1000, 1..8)) {
        let mut unique = orders;
        unique.sort_unstable();
        unique.dedup();
        let roots: Vec<_> = unique.iter().map(|&o| (Some(o), true)).collect();
        let graph = term_forest(&roots);

        let mut terms: Vec<_> = (0..roots.len())
            .map(|i| {
                let id = (i as u64 + 1) * 100 + 1;
                graph.term(TermId(id), "category").expect("query").expect("term")
            })
            .collect();

        let forward = find_deepest_term(&graph, &terms).expect("deepest");
        terms.reverse();
        let backward = find_deepest_term(&graph, &terms).expect("deepest");

        prop_assert_eq!(forward.clone(), backward);
        // Lowest order is the first root after sorting.
        prop_assert_eq!(forward.map(|t| t.id), Some(TermId(101)));
    }

    /// A term with an ordered root always beats an unordered one of equal depth.
    #[test]
    fn unordered_root_loses(order in any::<i64>().prop_filter("below max", |o| *o < i64::MAX)) {
        let graph = term_forest(&[(None, true), (Some(order), true)]);
        let terms = vec![
            graph.term(TermId(101), "category").expect("query").expect("term"),
            graph.term(TermId(201), "category").expect("query").expect("term"),
        ];
        let deepest = find_deepest_term(&graph, &terms).expect("deepest");
        prop_assert_eq!(deepest.map(|t| t.id), Some(TermId(201)));
    }
}
