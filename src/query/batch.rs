//! Batch similarity of one base set against many named candidate sets.

use super::collection::TermCollection;
use crate::ontology::Ontology;
use crate::stats::{SimilarityParams, SimilarityScorer};
use crate::{Error, Result};

/// One named candidate set, still unresolved.
#[derive(Clone, Debug)]
pub struct BatchItem {
    pub name: String,
    pub raw_set: String,
}

/// Outcome for one candidate set. Exactly one of `similarity` and `error`
/// is populated.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchOutcome {
    pub name: String,
    pub similarity: Option<f64>,
    pub error: Option<String>,
}

/// Scores `base` against every candidate set in order.
///
/// Resolution failures of a single candidate set never fail the batch; the
/// offending token is reported inline and the remaining items are still
/// processed. Anything other than a resolution failure aborts the whole
/// request.
pub fn run_batch(
    ontology: &Ontology,
    scorer: &dyn SimilarityScorer,
    base: &TermCollection<'_>,
    items: &[BatchItem],
    params: &SimilarityParams,
) -> Result<Vec<BatchOutcome>> {
    items
        .iter()
        .map(|item| match TermCollection::from_query(ontology, &item.raw_set) {
            Ok(candidate) => Ok(BatchOutcome {
                name: item.name.clone(),
                similarity: Some(scorer.score(base, &candidate, params)),
                error: None,
            }),
            Err(Error::TermNotFound { token } | Error::InvalidIdentifier { token }) => {
                Ok(BatchOutcome {
                    name: item.name.clone(),
                    similarity: None,
                    error: Some(token),
                })
            }
            Err(other) => Err(other),
        })
        .collect()
}
