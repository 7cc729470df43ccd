//! Term suggestions derived from annotation enrichment.
//!
//! Suggestions run a two-stage pipeline: first the base set is enriched
//! into candidate diseases and genes, then the top annotations are enriched
//! back into terms. The merged term ranking, minus the base set, is the
//! suggestion list.

use super::collection::TermCollection;
use crate::ontology::{Ontology, Term, TermId};
use crate::stats::{EnrichmentMethod, Engines, TermEnrichmentRecord};
use crate::Result;

/// Pipeline limits, all taken from query parameters.
#[derive(Copy, Clone, Debug)]
pub struct SuggestCutoffs {
    /// How many top-ranked genes feed the term stage.
    pub n_genes: usize,
    /// How many top-ranked diseases feed the term stage.
    pub n_omim: usize,
    pub limit: usize,
    pub offset: usize,
}

/// Computes ranked term suggestions for `base`.
///
/// Disease-derived candidates precede gene-derived ones before the merged
/// ascending sort; the sort is stable so that order breaks score ties.
/// Members of the base set and duplicates are skipped, and the scan
/// terminates once `limit` suggestions are accepted or the candidate list
/// is exhausted.
pub fn suggest<'o>(
    ontology: &'o Ontology,
    engines: &Engines,
    method: EnrichmentMethod,
    base: &TermCollection<'_>,
    cutoffs: SuggestCutoffs,
) -> Result<Vec<&'o Term>> {
    let mut candidates: Vec<TermEnrichmentRecord> = Vec::new();

    if cutoffs.n_omim > 0 {
        let diseases: Vec<u32> = engines
            .disease_enrichment
            .enrich(method, base)
            .into_iter()
            .take(cutoffs.n_omim)
            .map(|record| record.item)
            .collect();
        candidates.extend(engines.term_enrichment_for_diseases.enrich(method, &diseases));
    }
    if cutoffs.n_genes > 0 {
        let genes: Vec<u32> = engines
            .gene_enrichment
            .enrich(method, base)
            .into_iter()
            .take(cutoffs.n_genes)
            .map(|record| record.item)
            .collect();
        candidates.extend(engines.term_enrichment_for_genes.enrich(method, &genes));
    }

    candidates.sort_by(|a, b| a.enrichment.total_cmp(&b.enrichment));

    let mut suggestions: Vec<&'o Term> = Vec::new();
    for record in candidates.into_iter().skip(cutoffs.offset) {
        if suggestions.len() == cutoffs.limit {
            break;
        }
        // Engines may report ids the store no longer holds; skip those.
        let Some(term) = ontology.term(TermId(record.term)) else {
            continue;
        };
        if base.contains(term.id()) || suggestions.iter().any(|t| t.id() == term.id()) {
            continue;
        }
        suggestions.push(term);
    }
    Ok(suggestions)
}
