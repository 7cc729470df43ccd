//! Hypergeometric enrichment ranking.
//!
//! Two directions are supported: ranking annotations (genes or diseases)
//! against a term set, and ranking terms against a list of annotation ids.
//! Both score with the hypergeometric survival function and sort ascending,
//! so the most over-represented entries come first.

use std::collections::HashMap;
use std::sync::Arc;

use super::{
    AnnotationEnrichment, EnrichmentMethod, EnrichmentRecord, TermEnrichment,
    TermEnrichmentRecord,
};
use crate::ontology::{AnnotationKind, Ontology};
use crate::query::TermCollection;

/// Cumulative ln-factorial table, index `n` holds `ln(n!)`.
fn ln_factorials(up_to: usize) -> Vec<f64> {
    let mut table = Vec::with_capacity(up_to + 1);
    table.push(0.0);
    for n in 1..=up_to {
        table.push(table[n - 1] + (n as f64).ln());
    }
    table
}

fn ln_choose(table: &[f64], n: usize, k: usize) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    table[n] - table[k] - table[n - k]
}

/// P(X >= hits) drawing `draws` without replacement from a population of
/// `population` items of which `successes` are marked.
fn survival(table: &[f64], hits: usize, draws: usize, successes: usize, population: usize) -> f64 {
    if hits == 0 {
        return 1.0;
    }
    let denominator = ln_choose(table, population, draws);
    let mut p = 0.0;
    for i in hits..=successes.min(draws) {
        if draws - i > population - successes {
            continue;
        }
        let numerator =
            ln_choose(table, successes, i) + ln_choose(table, population - successes, draws - i);
        p += (numerator - denominator).exp();
    }
    p.min(1.0)
}

/// Ranks genes or diseases by over-representation in a term collection.
pub struct HypergeomEnrichment {
    ontology: Arc<Ontology>,
    kind: AnnotationKind,
    /// Annotation id to the number of terms it annotates, closure included.
    annotated_terms: HashMap<u32, usize>,
    ln_table: Vec<f64>,
}

impl HypergeomEnrichment {
    #[must_use]
    pub fn new(ontology: Arc<Ontology>, kind: AnnotationKind) -> Self {
        let mut annotated_terms: HashMap<u32, usize> = HashMap::new();
        for term in ontology.terms() {
            for id in term.annotations(kind) {
                *annotated_terms.entry(*id).or_default() += 1;
            }
        }
        let ln_table = ln_factorials(ontology.len());
        Self {
            ontology,
            kind,
            annotated_terms,
            ln_table,
        }
    }
}

impl AnnotationEnrichment for HypergeomEnrichment {
    fn enrich(&self, method: EnrichmentMethod, set: &TermCollection<'_>) -> Vec<EnrichmentRecord> {
        let EnrichmentMethod::Hypergeom = method;

        let mut hits: HashMap<u32, usize> = HashMap::new();
        for term in set.iter() {
            for id in term.annotations(self.kind) {
                *hits.entry(*id).or_default() += 1;
            }
        }

        let population = self.ontology.len();
        let mut records: Vec<EnrichmentRecord> = hits
            .into_iter()
            .map(|(item, count)| {
                let successes = self.annotated_terms.get(&item).copied().unwrap_or(count);
                EnrichmentRecord {
                    item,
                    count,
                    enrichment: survival(&self.ln_table, count, set.len(), successes, population),
                }
            })
            .collect();
        records.sort_by(|a, b| {
            a.enrichment
                .total_cmp(&b.enrichment)
                .then(a.item.cmp(&b.item))
        });
        records
    }
}

/// Ranks terms by over-representation among a list of gene or disease ids.
pub struct HypergeomTermEnrichment {
    ontology: Arc<Ontology>,
    kind: AnnotationKind,
    ln_table: Vec<f64>,
}

impl HypergeomTermEnrichment {
    #[must_use]
    pub fn new(ontology: Arc<Ontology>, kind: AnnotationKind) -> Self {
        let population = match kind {
            AnnotationKind::Gene => ontology.gene_count(),
            AnnotationKind::Disease => ontology.disease_count(),
        };
        let ln_table = ln_factorials(population.max(1));
        Self {
            ontology,
            kind,
            ln_table,
        }
    }

    fn population(&self) -> usize {
        match self.kind {
            AnnotationKind::Gene => self.ontology.gene_count(),
            AnnotationKind::Disease => self.ontology.disease_count(),
        }
    }
}

impl TermEnrichment for HypergeomTermEnrichment {
    fn enrich(&self, method: EnrichmentMethod, items: &[u32]) -> Vec<TermEnrichmentRecord> {
        let EnrichmentMethod::Hypergeom = method;

        let population = self.population();
        let mut records: Vec<TermEnrichmentRecord> = self
            .ontology
            .terms()
            .filter_map(|term| {
                let annotated = term.annotations(self.kind);
                let count = items
                    .iter()
                    .filter(|id| annotated.binary_search(id).is_ok())
                    .count();
                if count == 0 {
                    return None;
                }
                Some(TermEnrichmentRecord {
                    term: term.id().value(),
                    count,
                    enrichment: survival(
                        &self.ln_table,
                        count,
                        items.len(),
                        annotated.len(),
                        population,
                    ),
                })
            })
            .collect();
        records.sort_by(|a, b| {
            a.enrichment
                .total_cmp(&b.enrichment)
                .then(a.term.cmp(&b.term))
        });
        records
    }
}
