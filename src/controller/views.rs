//! JSON response bodies.
//!
//! Views are serialization-only shapes built from borrowed domain entities;
//! the optional fields belong to the `verbose` variants and disappear from
//! the payload when unset.

use serde::Serialize;

use crate::ontology::{Disease, Gene, InformationContent, Ontology, Term};
use crate::query::{BatchOutcome, HierarchyRecord, Neighbourhood};

#[derive(Clone, Debug, Serialize)]
pub struct TermView {
    /// Raw numeric id.
    pub int: u32,
    /// Canonical string id, e.g. `HP:0007401`.
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonym: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xref: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_a: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ic: Option<InformationContent>,
}

impl TermView {
    #[must_use]
    pub fn new(term: &Term) -> Self {
        Self {
            int: term.id().value(),
            id: term.term_id(),
            name: term.name().to_string(),
            definition: None,
            comment: None,
            synonym: None,
            xref: None,
            is_a: None,
            ic: None,
        }
    }

    /// Full view with definition, cross references and parent links.
    #[must_use]
    pub fn verbose(ontology: &Ontology, term: &Term) -> Self {
        let is_a = ontology
            .parents_of(term)
            .iter()
            .map(|parent| format!("{} ! {}", parent.id(), parent.name()))
            .collect();
        Self {
            definition: term.definition().map(str::to_string),
            comment: term.comment().map(str::to_string),
            synonym: Some(term.synonyms().to_vec()),
            xref: Some(term.xrefs().to_vec()),
            is_a: Some(is_a),
            ic: Some(term.information_content()),
            ..Self::new(term)
        }
    }

    #[must_use]
    pub fn build(ontology: &Ontology, term: &Term, verbose: bool) -> Self {
        if verbose {
            Self::verbose(ontology, term)
        } else {
            Self::new(term)
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct GeneView {
    pub id: u32,
    pub name: String,
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hpo: Option<Vec<TermView>>,
}

impl GeneView {
    #[must_use]
    pub fn new(gene: &Gene) -> Self {
        Self {
            id: gene.id(),
            name: gene.symbol().to_string(),
            symbol: gene.symbol().to_string(),
            hpo: None,
        }
    }

    /// Includes the annotated terms of the gene.
    #[must_use]
    pub fn verbose(ontology: &Ontology, gene: &Gene) -> Self {
        let hpo = gene
            .terms()
            .iter()
            .filter_map(|id| ontology.term(*id))
            .map(TermView::new)
            .collect();
        Self {
            hpo: Some(hpo),
            ..Self::new(gene)
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct DiseaseView {
    pub id: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hpo: Option<Vec<TermView>>,
}

impl DiseaseView {
    #[must_use]
    pub fn new(disease: &Disease) -> Self {
        Self {
            id: disease.id(),
            name: disease.name().to_string(),
            hpo: None,
        }
    }

    /// Includes the annotated terms of the disease.
    #[must_use]
    pub fn verbose(ontology: &Ontology, disease: &Disease) -> Self {
        let hpo = disease
            .terms()
            .iter()
            .filter_map(|id| ontology.term(*id))
            .map(TermView::new)
            .collect();
        Self {
            hpo: Some(hpo),
            ..Self::new(disease)
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct NeighbourhoodView {
    pub parents: Vec<TermView>,
    pub children: Vec<TermView>,
    pub neighbours: Vec<TermView>,
}

impl NeighbourhoodView {
    #[must_use]
    pub fn new(ontology: &Ontology, hood: &Neighbourhood<'_>, verbose: bool) -> Self {
        let views = |set: &crate::query::TermCollection<'_>| {
            set.iter()
                .map(|term| TermView::build(ontology, term, verbose))
                .collect()
        };
        Self {
            parents: views(&hood.parents),
            children: views(&hood.children),
            neighbours: views(&hood.neighbours),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SimilarityView {
    pub set1: Vec<TermView>,
    pub set2: Vec<TermView>,
    pub similarity: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct DiseaseSimilarityView {
    pub set1: Vec<TermView>,
    pub set2: Vec<TermView>,
    pub omim: DiseaseView,
    pub similarity: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct GeneSimilarityView {
    pub set1: Vec<TermView>,
    pub set2: Vec<TermView>,
    pub gene: GeneView,
    pub similarity: f64,
}

/// One row of a batch comparison. `similarity` and `error` serialize even
/// when null so every row carries the same keys.
#[derive(Clone, Debug, Serialize)]
pub struct BatchItemView {
    pub name: String,
    pub similarity: Option<f64>,
    pub error: Option<String>,
}

impl From<BatchOutcome> for BatchItemView {
    fn from(outcome: BatchOutcome) -> Self {
        Self {
            name: outcome.name,
            similarity: outcome.similarity,
            error: outcome.error,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct BatchSimilarityView {
    pub set1: Vec<TermView>,
    pub other_sets: Vec<BatchItemView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct EnrichedGeneView {
    pub gene: GeneView,
    pub count: usize,
    pub enrichment: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct EnrichedDiseaseView {
    pub omim: DiseaseView,
    pub count: usize,
    pub enrichment: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct HierarchyRecordView {
    pub name: String,
    pub omim: f64,
    pub gene: f64,
    pub imports: Vec<String>,
    pub diseases: Vec<String>,
    pub genes: Vec<String>,
}

impl From<HierarchyRecord> for HierarchyRecordView {
    fn from(record: HierarchyRecord) -> Self {
        Self {
            name: record.name,
            omim: record.omim,
            gene: record.gene,
            imports: record.imports,
            diseases: record.diseases,
            genes: record.genes,
        }
    }
}
