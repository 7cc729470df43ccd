//! Process-wide, read-only ontology store.
//!
//! The store is built exactly once during boot, wrapped in an `Arc` and
//! shared by reference with every request handler. Nothing mutates it
//! afterwards, so request handling needs no locks.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::entities::{AnnotationKind, Disease, Gene, InformationContent, Term, TermId};

/// Errors raised while assembling the ontology store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("term `{0}` declared twice")]
    DuplicateTerm(TermId),
    #[error("gene `{0}` declared twice")]
    DuplicateGene(u32),
    #[error("disease `{0}` declared twice")]
    DuplicateDisease(u32),
    #[error("term `{term}` references unknown parent `{parent}`")]
    UnknownParent { term: TermId, parent: TermId },
    #[error("annotation `{annotation}` references unknown term `{term}`")]
    UnknownAnnotatedTerm { annotation: String, term: TermId },
    #[error("failed to read ontology data `{path}`: {source}")]
    DataIo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse ontology data `{path}`: {source}")]
    DataFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// On-disk representation of a single term.
#[derive(Debug, Deserialize)]
pub struct TermSeed {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub xrefs: Vec<String>,
    #[serde(default)]
    pub parents: Vec<u32>,
    #[serde(default)]
    pub ic: InformationContent,
}

#[derive(Debug, Deserialize)]
pub struct GeneSeed {
    pub id: u32,
    pub symbol: String,
    #[serde(default)]
    pub terms: Vec<u32>,
}

#[derive(Debug, Deserialize)]
pub struct DiseaseSeed {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub terms: Vec<u32>,
}

/// Complete data file: terms plus both annotation registries.
#[derive(Debug, Default, Deserialize)]
pub struct OntologySeed {
    #[serde(default)]
    pub terms: Vec<TermSeed>,
    #[serde(default)]
    pub genes: Vec<GeneSeed>,
    #[serde(default)]
    pub diseases: Vec<DiseaseSeed>,
}

/// Immutable term arena with lookup and annotation indices.
#[derive(Debug, Default)]
pub struct Ontology {
    terms: BTreeMap<u32, Term>,
    names: HashMap<String, u32>,
    genes: BTreeMap<u32, Gene>,
    gene_symbols: HashMap<String, u32>,
    diseases: BTreeMap<u32, Disease>,
}

impl Ontology {
    /// Builds the store from a seed, wiring children and propagating
    /// annotations from each annotated term up to all of its ancestors.
    pub fn from_seed(seed: OntologySeed) -> Result<Self, StoreError> {
        let mut terms: BTreeMap<u32, Term> = BTreeMap::new();
        let mut names: HashMap<String, u32> = HashMap::new();

        for term in seed.terms {
            let id = TermId(term.id);
            if terms.contains_key(&term.id) {
                return Err(StoreError::DuplicateTerm(id));
            }
            names.insert(term.name.clone(), term.id);
            terms.insert(
                term.id,
                Term::new(
                    id,
                    term.name,
                    term.definition,
                    term.comment,
                    term.synonyms,
                    term.xrefs,
                    term.parents.into_iter().map(TermId).collect(),
                    term.ic,
                ),
            );
        }

        // Children are derived from the parent declarations.
        let ids: Vec<u32> = terms.keys().copied().collect();
        for id in &ids {
            let parents = terms[id].parents().to_vec();
            for parent in parents {
                let Some(parent_term) = terms.get_mut(&parent.0) else {
                    return Err(StoreError::UnknownParent {
                        term: TermId(*id),
                        parent,
                    });
                };
                parent_term.push_child(TermId(*id));
            }
        }

        let mut store = Self {
            terms,
            names,
            genes: BTreeMap::new(),
            gene_symbols: HashMap::new(),
            diseases: BTreeMap::new(),
        };

        for gene in seed.genes {
            if store.genes.contains_key(&gene.id) {
                return Err(StoreError::DuplicateGene(gene.id));
            }
            let term_ids: Vec<TermId> = gene.terms.iter().copied().map(TermId).collect();
            store.annotate(AnnotationKind::Gene, gene.id, &gene.symbol, &term_ids)?;
            store.gene_symbols.insert(gene.symbol.clone(), gene.id);
            store
                .genes
                .insert(gene.id, Gene::new(gene.id, gene.symbol, term_ids));
        }

        for disease in seed.diseases {
            if store.diseases.contains_key(&disease.id) {
                return Err(StoreError::DuplicateDisease(disease.id));
            }
            let term_ids: Vec<TermId> = disease.terms.iter().copied().map(TermId).collect();
            store.annotate(AnnotationKind::Disease, disease.id, &disease.name, &term_ids)?;
            store
                .diseases
                .insert(disease.id, Disease::new(disease.id, disease.name, term_ids));
        }

        for term in store.terms.values_mut() {
            term.finalize_annotations();
        }

        Ok(store)
    }

    /// Reads and parses a JSON data file.
    pub fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path).map_err(|source| StoreError::DataIo {
            path: path.to_path_buf(),
            source,
        })?;
        let seed: OntologySeed =
            serde_json::from_str(&raw).map_err(|source| StoreError::DataFormat {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_seed(seed)
    }

    /// Attaches an annotation to every listed term and its ancestors.
    fn annotate(
        &mut self,
        kind: AnnotationKind,
        annotation_id: u32,
        annotation_name: &str,
        term_ids: &[TermId],
    ) -> Result<(), StoreError> {
        for term_id in term_ids {
            if !self.terms.contains_key(&term_id.0) {
                return Err(StoreError::UnknownAnnotatedTerm {
                    annotation: annotation_name.to_string(),
                    term: *term_id,
                });
            }
            let mut queue = VecDeque::from([term_id.0]);
            while let Some(current) = queue.pop_front() {
                let Some(term) = self.terms.get_mut(&current) else {
                    continue;
                };
                term.push_annotation(kind, annotation_id);
                queue.extend(term.parents().iter().map(|p| p.0));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn term(&self, id: TermId) -> Option<&Term> {
        self.terms.get(&id.0)
    }

    /// Exact name lookup.
    #[must_use]
    pub fn term_by_name(&self, name: &str) -> Option<&Term> {
        self.names.get(name).and_then(|id| self.terms.get(id))
    }

    /// Case-insensitive substring search over names and synonyms,
    /// ordered by numeric id.
    pub fn search<'o>(&'o self, query: &str) -> impl Iterator<Item = &'o Term> {
        let needle = query.to_lowercase();
        self.terms.values().filter(move |term| {
            term.name().to_lowercase().contains(&needle)
                || term
                    .synonyms()
                    .iter()
                    .any(|synonym| synonym.to_lowercase().contains(&needle))
        })
    }

    /// Resolved direct parents of a term, in declaration order.
    #[must_use]
    pub fn parents_of<'o>(&'o self, term: &Term) -> Vec<&'o Term> {
        term.parents()
            .iter()
            .filter_map(|id| self.term(*id))
            .collect()
    }

    /// Resolved direct children of a term, in insertion order.
    #[must_use]
    pub fn children_of<'o>(&'o self, term: &Term) -> Vec<&'o Term> {
        term.children()
            .iter()
            .filter_map(|id| self.term(*id))
            .collect()
    }

    #[must_use]
    pub fn gene(&self, id: u32) -> Option<&Gene> {
        self.genes.get(&id)
    }

    #[must_use]
    pub fn gene_by_symbol(&self, symbol: &str) -> Option<&Gene> {
        self.gene_symbols
            .get(symbol)
            .and_then(|id| self.genes.get(id))
    }

    #[must_use]
    pub fn disease(&self, id: u32) -> Option<&Disease> {
        self.diseases.get(&id)
    }

    pub fn genes(&self) -> impl Iterator<Item = &Gene> {
        self.genes.values()
    }

    pub fn diseases(&self) -> impl Iterator<Item = &Disease> {
        self.diseases.values()
    }

    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[must_use]
    pub fn gene_count(&self) -> usize {
        self.genes.len()
    }

    #[must_use]
    pub fn disease_count(&self) -> usize {
        self.diseases.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> OntologySeed {
        OntologySeed {
            terms: vec![
                TermSeed {
                    id: 1,
                    name: "Root".into(),
                    definition: None,
                    comment: None,
                    synonyms: vec![],
                    xrefs: vec![],
                    parents: vec![],
                    ic: InformationContent::default(),
                },
                TermSeed {
                    id: 11,
                    name: "Child".into(),
                    definition: None,
                    comment: None,
                    synonyms: vec!["alias".into()],
                    xrefs: vec![],
                    parents: vec![1],
                    ic: InformationContent::default(),
                },
            ],
            genes: vec![GeneSeed {
                id: 7,
                symbol: "GBA".into(),
                terms: vec![11],
            }],
            diseases: vec![],
        }
    }

    #[test]
    fn children_are_derived_from_parents() {
        let store = Ontology::from_seed(seed()).expect("store");
        let root = store.term(TermId(1)).expect("root");
        assert_eq!(root.children(), &[TermId(11)]);
    }

    #[test]
    fn annotations_propagate_to_ancestors() {
        let store = Ontology::from_seed(seed()).expect("store");
        assert_eq!(store.term(TermId(11)).expect("child").genes(), &[7]);
        assert_eq!(store.term(TermId(1)).expect("root").genes(), &[7]);
        assert_eq!(store.gene_by_symbol("GBA").expect("gene").id(), 7);
    }

    #[test]
    fn search_covers_synonyms() {
        let store = Ontology::from_seed(seed()).expect("store");
        let hits: Vec<_> = store.search("ALIA").map(|t| t.id()).collect();
        assert_eq!(hits, vec![TermId(11)]);
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let mut bad = seed();
        bad.terms[1].parents = vec![99];
        assert!(matches!(
            Ontology::from_seed(bad),
            Err(StoreError::UnknownParent { .. })
        ));
    }
}
