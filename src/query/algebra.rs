//! Union and intersection of annotations across a term collection.

use super::collection::TermCollection;
use crate::ontology::{AnnotationKind, Disease, Gene, Ontology};

/// Set operation over the annotation sets of a term collection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SetOperation {
    /// An annotation qualifies if linked to at least one term.
    Union,
    /// An annotation qualifies only if linked to every term.
    Intersection,
}

/// Computes the combined annotation ids for the requested kind.
///
/// Union output follows collection order, then per-term index order, with
/// duplicates removed. Intersection starts from the union and filters it
/// progressively per term, so `intersection ⊆ union` holds by construction.
#[must_use]
pub fn combine_ids(set: &TermCollection<'_>, kind: AnnotationKind, op: SetOperation) -> Vec<u32> {
    let mut combined: Vec<u32> = Vec::new();
    for term in set.iter() {
        for id in term.annotations(kind) {
            if !combined.contains(id) {
                combined.push(*id);
            }
        }
    }

    if op == SetOperation::Intersection {
        for term in set.iter() {
            let per_term = term.annotations(kind);
            combined.retain(|id| per_term.binary_search(id).is_ok());
        }
    }

    combined
}

/// Gene view of [`combine_ids`].
#[must_use]
pub fn genes<'o>(
    ontology: &'o Ontology,
    set: &TermCollection<'_>,
    op: SetOperation,
) -> Vec<&'o Gene> {
    combine_ids(set, AnnotationKind::Gene, op)
        .iter()
        .filter_map(|id| ontology.gene(*id))
        .collect()
}

/// Disease view of [`combine_ids`].
#[must_use]
pub fn diseases<'o>(
    ontology: &'o Ontology,
    set: &TermCollection<'_>,
    op: SetOperation,
) -> Vec<&'o Disease> {
    combine_ids(set, AnnotationKind::Disease, op)
        .iter()
        .filter_map(|id| ontology.disease(*id))
        .collect()
}
