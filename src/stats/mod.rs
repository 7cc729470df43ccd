//! Seams to the statistical engines.
//!
//! Similarity scoring and enrichment ranking are owned by engines behind
//! object-safe traits; handlers receive them through [`Engines`] inside the
//! application context instead of module globals. Native in-process
//! implementations live in the submodules, tests swap in mocks.

pub mod enrichment;
pub mod similarity;

use std::str::FromStr;
use std::sync::Arc;

use crate::ontology::{InformationContentKind, Ontology};
use crate::query::TermCollection;
use crate::Error;

pub use enrichment::{HypergeomEnrichment, HypergeomTermEnrichment};
pub use similarity::IcSimilarity;

/// Pairwise term-set scoring algorithm.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SimilarityMethod {
    Resnik,
    Lin,
    Jc,
    Jc2,
    Rel,
    Ic,
    #[default]
    Graphic,
    Dist,
    Equal,
}

impl FromStr for SimilarityMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resnik" => Ok(Self::Resnik),
            "lin" => Ok(Self::Lin),
            "jc" => Ok(Self::Jc),
            "jc2" => Ok(Self::Jc2),
            "rel" => Ok(Self::Rel),
            "ic" => Ok(Self::Ic),
            "graphic" => Ok(Self::Graphic),
            "dist" => Ok(Self::Dist),
            "equal" => Ok(Self::Equal),
            other => Err(Error::InvalidSimilarityMethod {
                value: other.to_string(),
            }),
        }
    }
}

/// Strategy turning the pairwise score matrix into one scalar.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CombineMethod {
    #[default]
    FunSimAvg,
    FunSimMax,
    Bma,
}

impl FromStr for CombineMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "funSimAvg" => Ok(Self::FunSimAvg),
            "funSimMax" => Ok(Self::FunSimMax),
            "BMA" => Ok(Self::Bma),
            other => Err(Error::InvalidCombineStrategy {
                value: other.to_string(),
            }),
        }
    }
}

/// Enrichment ranking algorithm.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EnrichmentMethod {
    #[default]
    Hypergeom,
}

impl FromStr for EnrichmentMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hypergeom" => Ok(Self::Hypergeom),
            _ => Err(Error::InvalidQuery),
        }
    }
}

/// Validated similarity parameters, parsed once per request.
#[derive(Copy, Clone, Debug, Default)]
pub struct SimilarityParams {
    pub method: SimilarityMethod,
    pub combine: CombineMethod,
    pub kind: InformationContentKind,
}

impl SimilarityParams {
    /// Parses the raw query parameters, falling back to the documented
    /// defaults (`graphic`, `funSimAvg`, `omim`) when absent.
    pub fn parse(
        method: Option<&str>,
        combine: Option<&str>,
        kind: Option<&str>,
    ) -> crate::Result<Self> {
        Ok(Self {
            method: method.map_or(Ok(SimilarityMethod::default()), str::parse)?,
            combine: combine.map_or(Ok(CombineMethod::default()), str::parse)?,
            kind: kind.map_or(Ok(InformationContentKind::default()), str::parse)?,
        })
    }
}

/// Scores one term collection against another.
pub trait SimilarityScorer: Send + Sync {
    fn score(
        &self,
        set1: &TermCollection<'_>,
        set2: &TermCollection<'_>,
        params: &SimilarityParams,
    ) -> f64;
}

/// Externally produced, ranked annotation enrichment entry.
#[derive(Clone, Debug, PartialEq)]
pub struct EnrichmentRecord {
    /// Gene or disease id, depending on the model's annotation kind.
    pub item: u32,
    pub count: usize,
    pub enrichment: f64,
}

/// Ranks annotations (genes or diseases) by over-representation in a
/// query set. Output is sorted ascending by enrichment score.
pub trait AnnotationEnrichment: Send + Sync {
    fn enrich(&self, method: EnrichmentMethod, set: &TermCollection<'_>) -> Vec<EnrichmentRecord>;
}

/// Ranked term-level enrichment entry.
#[derive(Clone, Debug, PartialEq)]
pub struct TermEnrichmentRecord {
    /// Numeric term id.
    pub term: u32,
    pub count: usize,
    pub enrichment: f64,
}

/// Ranks terms by over-representation among a list of gene or disease ids.
/// Output is sorted ascending by enrichment score.
pub trait TermEnrichment: Send + Sync {
    fn enrich(&self, method: EnrichmentMethod, items: &[u32]) -> Vec<TermEnrichmentRecord>;
}

/// Engine handles injected into every request handler.
#[derive(Clone)]
pub struct Engines {
    pub similarity: Arc<dyn SimilarityScorer>,
    pub gene_enrichment: Arc<dyn AnnotationEnrichment>,
    pub disease_enrichment: Arc<dyn AnnotationEnrichment>,
    pub term_enrichment_for_genes: Arc<dyn TermEnrichment>,
    pub term_enrichment_for_diseases: Arc<dyn TermEnrichment>,
}

impl Engines {
    /// Wires the native in-process engines against the shared store.
    #[must_use]
    pub fn native(ontology: Arc<Ontology>) -> Self {
        use crate::ontology::AnnotationKind;

        Self {
            similarity: Arc::new(IcSimilarity::new(Arc::clone(&ontology))),
            gene_enrichment: Arc::new(HypergeomEnrichment::new(
                Arc::clone(&ontology),
                AnnotationKind::Gene,
            )),
            disease_enrichment: Arc::new(HypergeomEnrichment::new(
                Arc::clone(&ontology),
                AnnotationKind::Disease,
            )),
            term_enrichment_for_genes: Arc::new(HypergeomTermEnrichment::new(
                Arc::clone(&ontology),
                AnnotationKind::Gene,
            )),
            term_enrichment_for_diseases: Arc::new(HypergeomTermEnrichment::new(
                ontology,
                AnnotationKind::Disease,
            )),
        }
    }
}
