//! # Term Hierarchy
//!
//! Ancestor walks and primary-term selection for taxonomy crumbs.
//!
//! ## Deepest term
//!
//! When an item carries several terms of its primary taxonomy and none is
//! explicitly configured, the most specific one is chosen:
//!
//! 1. Terms that are the parent of another term in the set are discarded.
//! 2. The candidate with the longest ancestor chain wins.
//! 3. Ties go to the candidate whose root ancestor has the lowest order;
//!    a missing order counts as [`DEFAULT_ROOT_ORDER`].
//! 4. Remaining ties go to the first candidate in assignment order.

use crate::config::ConfigProvider;
use crate::graph::ContentGraph;
use crate::primitives::{DEFAULT_ROOT_ORDER, is_set};
use crate::{ContentItem, Term, TermId, TrailError};
use std::collections::BTreeSet;

/// Ancestors of a term, oldest first. The term itself is not included.
///
/// A parent reference the graph cannot resolve is a contract violation.
pub fn term_parents<G: ContentGraph + ?Sized>(
    graph: &G,
    term: &Term,
) -> Result<Vec<Term>, TrailError> {
    let mut parents = Vec::new();
    let mut parent = term.parent;
    while !parent.is_root() {
        let next = graph
            .term(parent, &term.taxonomy)?
            .ok_or_else(|| TrailError::TermNotFound(parent, term.taxonomy.clone()))?;
        parent = next.parent;
        parents.push(next);
    }
    parents.reverse();
    Ok(parents)
}

/// Pick the most specific term of a set. Returns `None` for an empty set.
pub fn find_deepest_term<G: ContentGraph + ?Sized>(
    graph: &G,
    terms: &[Term],
) -> Result<Option<Term>, TrailError> {
    let parent_ids: BTreeSet<TermId> = terms.iter().map(|t| t.parent).collect();

    let mut seen = BTreeSet::new();
    let candidates = terms
        .iter()
        .filter(|t| seen.insert(t.id))
        .filter(|t| !parent_ids.contains(&t.id));

    let mut best: Option<(usize, i64, &Term)> = None;
    for term in candidates {
        let parents = term_parents(graph, term)?;
        let depth = parents.len();
        let root_order = parents
            .first()
            .filter(|root| root.parent.is_root())
            .and_then(|root| root.order)
            .unwrap_or(DEFAULT_ROOT_ORDER);

        let better = match best {
            None => true,
            Some((best_depth, best_order, _)) => {
                depth > best_depth || (depth == best_depth && root_order < best_order)
            }
        };
        if better {
            best = Some((depth, root_order, term));
        }
    }

    Ok(best.map(|(_, _, term)| term.clone()))
}

/// Term crumbs for a root item: ancestors of the chosen term, then the term.
///
/// Empty when the item's content type has no primary taxonomy or the item
/// carries no term in it.
pub fn primary_term_trail<G, C>(
    graph: &G,
    config: &C,
    item: &ContentItem,
) -> Result<Vec<Term>, TrailError>
where
    G: ContentGraph + ?Sized,
    C: ConfigProvider + ?Sized,
{
    let Some(taxonomy) = config
        .primary_taxonomy(&item.content_type)
        .filter(|t| is_set(t))
    else {
        return Ok(Vec::new());
    };

    let terms = graph.item_terms(item.id, taxonomy)?;
    if terms.is_empty() {
        return Ok(Vec::new());
    }

    let explicit = match config.primary_term(item.id, taxonomy) {
        Some(id) => {
            let term = graph.term(id, taxonomy)?;
            if term.is_none() {
                tracing::debug!(
                    item = item.id.0,
                    term = id.0,
                    taxonomy,
                    "primary term not found, falling back to deepest term"
                );
            }
            term
        }
        None => None,
    };

    let term = match explicit {
        Some(term) => term,
        None => match find_deepest_term(graph, &terms)? {
            Some(term) => term,
            None => return Ok(Vec::new()),
        },
    };

    let mut trail = Vec::new();
    if graph.is_hierarchical(taxonomy)? && !term.parent.is_root() {
        trail.extend(term_parents(graph, &term)?);
    }
    trail.push(term);
    Ok(trail)
}

// =============================================================================
// TESTS
// =============================================================================
