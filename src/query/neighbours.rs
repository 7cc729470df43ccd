//! One-hop neighbourhood discovery for a single term.

use super::collection::TermCollection;
use crate::ontology::{Ontology, Term};

/// Parents, children and siblings-by-shared-edge of a query term.
#[derive(Debug)]
pub struct Neighbourhood<'o> {
    pub parents: TermCollection<'o>,
    pub children: TermCollection<'o>,
    pub neighbours: TermCollection<'o>,
}

/// Computes the neighbourhood of `term`.
///
/// A neighbour is any other child of a parent, or any other parent of a
/// child, that is neither the query term itself nor one of its direct
/// parents or children. The result sets are deduplicated.
#[must_use]
pub fn neighbourhood<'o>(ontology: &'o Ontology, term: &'o Term) -> Neighbourhood<'o> {
    let mut parents = TermCollection::new();
    for parent in ontology.parents_of(term) {
        parents.insert(parent);
    }
    let mut children = TermCollection::new();
    for child in ontology.children_of(term) {
        children.insert(child);
    }

    let mut neighbours = TermCollection::new();
    let mut consider = |candidate: &'o Term, neighbours: &mut TermCollection<'o>| {
        if candidate.id() != term.id()
            && !parents.contains(candidate.id())
            && !children.contains(candidate.id())
        {
            neighbours.insert(candidate);
        }
    };

    for parent in parents.iter() {
        for sibling in ontology.children_of(parent) {
            consider(sibling, &mut neighbours);
        }
    }
    for child in children.iter() {
        for co_parent in ontology.parents_of(child) {
            consider(co_parent, &mut neighbours);
        }
    }

    Neighbourhood {
        parents,
        children,
        neighbours,
    }
}
