//! Export-ready subgraph projection over a query set.

use super::collection::TermCollection;
use crate::ontology::{Ontology, Term};

/// One node of the projected subgraph.
#[derive(Clone, Debug, PartialEq)]
pub struct HierarchyRecord {
    pub name: String,
    /// Disease-kind information content.
    pub omim: f64,
    /// Gene-kind information content.
    pub gene: f64,
    /// Names of all direct children, unrestricted to the subgraph.
    pub imports: Vec<String>,
    pub diseases: Vec<String>,
    pub genes: Vec<String>,
}

/// Projects the query set plus its direct children into a flat record list.
///
/// Covered vertices are the set members and every direct child of a member
/// that is not itself a member. Output order is fixed: newly discovered
/// children first, in discovery order, then the set members in collection
/// order. Each term appears exactly once.
#[must_use]
pub fn project<'o>(ontology: &'o Ontology, set: &TermCollection<'o>) -> Vec<HierarchyRecord> {
    let mut discovered = TermCollection::new();
    for term in set.iter() {
        for child in ontology.children_of(term) {
            if !set.contains(child.id()) {
                discovered.insert(child);
            }
        }
    }

    discovered
        .iter()
        .chain(set.iter())
        .map(|term| record(ontology, term))
        .collect()
}

fn record(ontology: &Ontology, term: &Term) -> HierarchyRecord {
    let ic = term.information_content();
    HierarchyRecord {
        name: term.name().to_string(),
        omim: ic.omim,
        gene: ic.gene,
        imports: ontology
            .children_of(term)
            .iter()
            .map(|child| child.name().to_string())
            .collect(),
        diseases: term
            .diseases()
            .iter()
            .filter_map(|id| ontology.disease(*id))
            .map(|disease| disease.name().to_string())
            .collect(),
        genes: term
            .genes()
            .iter()
            .filter_map(|id| ontology.gene(*id))
            .map(|gene| gene.symbol().to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::{OntologySeed, TermSeed};

    fn store() -> Ontology {
        let term = |id: u32, name: &str, parents: Vec<u32>| TermSeed {
            id,
            name: name.into(),
            definition: None,
            comment: None,
            synonyms: vec![],
            xrefs: vec![],
            parents,
            ic: Default::default(),
        };
        Ontology::from_seed(OntologySeed {
            terms: vec![
                term(1, "root", vec![]),
                term(2, "c1", vec![1]),
                term(3, "c2", vec![1]),
                term(4, "d", vec![2]),
            ],
            genes: vec![],
            diseases: vec![],
        })
        .expect("fixture store")
    }

    #[test]
    fn covers_set_and_direct_children_once_each() {
        let store = store();
        // c1 has child d outside the set; c2 has none.
        let set = TermCollection::from_query(&store, "c1,c2").expect("set");
        let records = project(&store, &set);

        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["d", "c1", "c2"]);
    }

    #[test]
    fn children_already_in_set_are_not_rediscovered() {
        let store = store();
        let set = TermCollection::from_query(&store, "c1,d").expect("set");
        let records = project(&store, &set);

        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["c1", "d"]);
    }

    #[test]
    fn imports_list_all_children_unrestricted() {
        let store = store();
        let set = TermCollection::from_query(&store, "root").expect("set");
        let records = project(&store, &set);

        let root = records.last().expect("root record");
        assert_eq!(root.name, "root");
        assert_eq!(root.imports, vec!["c1", "c2"]);
    }
}
