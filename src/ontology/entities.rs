use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Numeric identifier of an ontology term.
///
/// The canonical string form pads the value to seven digits, e.g.
/// `TermId(7401)` renders as `HP:0007401`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermId(pub u32);

impl TermId {
    /// Returns the raw numeric value.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Display for TermId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "HP:{:07}", self.0)
    }
}

/// Precomputed information-content scalars per annotation kind.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InformationContent {
    #[serde(default)]
    pub gene: f64,
    #[serde(default)]
    pub omim: f64,
}

impl InformationContent {
    #[must_use]
    pub fn get(&self, kind: InformationContentKind) -> f64 {
        match kind {
            InformationContentKind::Gene => self.gene,
            InformationContentKind::Omim => self.omim,
        }
    }
}

/// Selects which information-content scalar similarity scoring reads.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InformationContentKind {
    Gene,
    #[default]
    Omim,
}

impl std::str::FromStr for InformationContentKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gene" => Ok(Self::Gene),
            "omim" => Ok(Self::Omim),
            other => Err(crate::Error::InvalidInformationContentKind {
                value: other.to_string(),
            }),
        }
    }
}

/// Classifies an annotation as a gene or a disease link.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AnnotationKind {
    Gene,
    Disease,
}

/// A node in the ontology graph.
///
/// Terms are immutable once the store is built; every other layer holds
/// `&Term` references into the [`Ontology`](super::store::Ontology) arena.
#[derive(Clone, Debug)]
pub struct Term {
    id: TermId,
    name: String,
    definition: Option<String>,
    comment: Option<String>,
    synonyms: Vec<String>,
    xrefs: Vec<String>,
    parents: Vec<TermId>,
    children: Vec<TermId>,
    ic: InformationContent,
    genes: Vec<u32>,
    diseases: Vec<u32>,
}

impl Term {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        id: TermId,
        name: String,
        definition: Option<String>,
        comment: Option<String>,
        synonyms: Vec<String>,
        xrefs: Vec<String>,
        parents: Vec<TermId>,
        ic: InformationContent,
    ) -> Self {
        Self {
            id,
            name,
            definition,
            comment,
            synonyms,
            xrefs,
            parents,
            children: Vec::new(),
            ic,
            genes: Vec::new(),
            diseases: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> TermId {
        self.id
    }

    /// Canonical namespaced string id, e.g. `HP:0007401`.
    #[must_use]
    pub fn term_id(&self) -> String {
        self.id.to_string()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }

    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    #[must_use]
    pub fn synonyms(&self) -> &[String] {
        &self.synonyms
    }

    #[must_use]
    pub fn xrefs(&self) -> &[String] {
        &self.xrefs
    }

    /// Direct parent term ids in declaration order.
    #[must_use]
    pub fn parents(&self) -> &[TermId] {
        &self.parents
    }

    /// Direct child term ids in insertion order.
    #[must_use]
    pub fn children(&self) -> &[TermId] {
        &self.children
    }

    #[must_use]
    pub fn information_content(&self) -> InformationContent {
        self.ic
    }

    /// Ids of annotated genes, sorted and unique. Includes annotations
    /// propagated up from descendant terms.
    #[must_use]
    pub fn genes(&self) -> &[u32] {
        &self.genes
    }

    /// Ids of annotated diseases, sorted and unique. Includes annotations
    /// propagated up from descendant terms.
    #[must_use]
    pub fn diseases(&self) -> &[u32] {
        &self.diseases
    }

    /// Annotation ids for the requested kind.
    #[must_use]
    pub fn annotations(&self, kind: AnnotationKind) -> &[u32] {
        match kind {
            AnnotationKind::Gene => &self.genes,
            AnnotationKind::Disease => &self.diseases,
        }
    }

    pub(super) fn push_child(&mut self, child: TermId) {
        self.children.push(child);
    }

    pub(super) fn push_annotation(&mut self, kind: AnnotationKind, id: u32) {
        match kind {
            AnnotationKind::Gene => self.genes.push(id),
            AnnotationKind::Disease => self.diseases.push(id),
        }
    }

    pub(super) fn finalize_annotations(&mut self) {
        self.genes.sort_unstable();
        self.genes.dedup();
        self.diseases.sort_unstable();
        self.diseases.dedup();
    }
}

/// A gene annotated to one or more terms.
#[derive(Clone, Debug)]
pub struct Gene {
    id: u32,
    symbol: String,
    terms: Vec<TermId>,
}

impl Gene {
    pub(super) fn new(id: u32, symbol: String, terms: Vec<TermId>) -> Self {
        Self { id, symbol, terms }
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Directly annotated term ids (no hierarchy propagation).
    #[must_use]
    pub fn terms(&self) -> &[TermId] {
        &self.terms
    }
}

/// A disease annotated to one or more terms.
#[derive(Clone, Debug)]
pub struct Disease {
    id: u32,
    name: String,
    terms: Vec<TermId>,
}

impl Disease {
    pub(super) fn new(id: u32, name: String, terms: Vec<TermId>) -> Self {
        Self { id, name, terms }
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directly annotated term ids (no hierarchy propagation).
    #[must_use]
    pub fn terms(&self) -> &[TermId] {
        &self.terms
    }
}
