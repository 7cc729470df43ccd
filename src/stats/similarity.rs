//! Native information-content based similarity scoring.
//!
//! The algorithms here are the usual IC family (Resnik, Lin, relevance,
//! graph-based IC, ...) computed over the precomputed per-term scalars and
//! the ancestor closure of the shared store.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use super::{CombineMethod, SimilarityMethod, SimilarityParams, SimilarityScorer};
use crate::ontology::{InformationContentKind, Ontology, Term, TermId};
use crate::query::TermCollection;

pub struct IcSimilarity {
    ontology: Arc<Ontology>,
}

impl IcSimilarity {
    #[must_use]
    pub fn new(ontology: Arc<Ontology>) -> Self {
        Self { ontology }
    }

    /// Ancestor closure including the term itself.
    fn ancestors(&self, id: TermId) -> HashSet<u32> {
        let mut seen = HashSet::from([id.value()]);
        let mut queue = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            if let Some(term) = self.ontology.term(current) {
                for parent in term.parents() {
                    if seen.insert(parent.value()) {
                        queue.push_back(*parent);
                    }
                }
            }
        }
        seen
    }

    /// Undirected shortest path length over is-a edges.
    fn distance(&self, start: TermId, end: TermId) -> Option<usize> {
        if start == end {
            return Some(0);
        }
        let mut seen = HashSet::from([start.value()]);
        let mut queue = VecDeque::from([(start, 0usize)]);
        while let Some((current, depth)) = queue.pop_front() {
            let Some(term) = self.ontology.term(current) else {
                continue;
            };
            for next in term.parents().iter().chain(term.children()) {
                if *next == end {
                    return Some(depth + 1);
                }
                if seen.insert(next.value()) {
                    queue.push_back((*next, depth + 1));
                }
            }
        }
        None
    }

    fn ic_of(&self, id: u32, kind: InformationContentKind) -> f64 {
        self.ontology
            .term(TermId(id))
            .map_or(0.0, |term| term.information_content().get(kind))
    }

    fn pair_score(
        &self,
        t1: &Term,
        t2: &Term,
        method: SimilarityMethod,
        kind: InformationContentKind,
    ) -> f64 {
        match method {
            SimilarityMethod::Equal => {
                if t1.id() == t2.id() {
                    1.0
                } else {
                    0.0
                }
            }
            SimilarityMethod::Dist => self
                .distance(t1.id(), t2.id())
                .map_or(0.0, |d| 1.0 / (1.0 + d as f64)),
            SimilarityMethod::Graphic => {
                let a1 = self.ancestors(t1.id());
                let a2 = self.ancestors(t2.id());
                let common: f64 = a1
                    .intersection(&a2)
                    .map(|id| self.ic_of(*id, kind))
                    .sum();
                let union: f64 = a1.union(&a2).map(|id| self.ic_of(*id, kind)).sum();
                if union == 0.0 {
                    // Degenerate IC data: fall back to exact matching so
                    // identical sets still score 1.
                    if t1.id() == t2.id() {
                        1.0
                    } else {
                        0.0
                    }
                } else {
                    common / union
                }
            }
            _ => {
                let ic1 = t1.information_content().get(kind);
                let ic2 = t2.information_content().get(kind);
                let a1 = self.ancestors(t1.id());
                let a2 = self.ancestors(t2.id());
                let mica = a1
                    .intersection(&a2)
                    .map(|id| self.ic_of(*id, kind))
                    .fold(0.0, f64::max);
                match method {
                    SimilarityMethod::Resnik => mica,
                    SimilarityMethod::Lin => {
                        if ic1 + ic2 == 0.0 {
                            0.0
                        } else {
                            2.0 * mica / (ic1 + ic2)
                        }
                    }
                    SimilarityMethod::Jc => 1.0 / (1.0 + ic1 + ic2 - 2.0 * mica),
                    SimilarityMethod::Jc2 => (1.0 - (ic1 + ic2 - 2.0 * mica)).clamp(0.0, 1.0),
                    SimilarityMethod::Rel => {
                        let lin = if ic1 + ic2 == 0.0 {
                            0.0
                        } else {
                            2.0 * mica / (ic1 + ic2)
                        };
                        lin * (1.0 - (-mica).exp())
                    }
                    SimilarityMethod::Ic => {
                        let lin = if ic1 + ic2 == 0.0 {
                            0.0
                        } else {
                            2.0 * mica / (ic1 + ic2)
                        };
                        lin * (1.0 - 1.0 / (1.0 + mica))
                    }
                    // Equal, Dist and Graphic are handled above.
                    _ => 0.0,
                }
            }
        }
    }
}

impl SimilarityScorer for IcSimilarity {
    fn score(
        &self,
        set1: &TermCollection<'_>,
        set2: &TermCollection<'_>,
        params: &SimilarityParams,
    ) -> f64 {
        if set1.is_empty() || set2.is_empty() {
            return 0.0;
        }

        let matrix: Vec<Vec<f64>> = set1
            .iter()
            .map(|t1| {
                set2.iter()
                    .map(|t2| self.pair_score(t1, t2, params.method, params.kind))
                    .collect()
            })
            .collect();

        let row_maxes: Vec<f64> = matrix
            .iter()
            .map(|row| row.iter().copied().fold(0.0, f64::max))
            .collect();
        let col_maxes: Vec<f64> = (0..set2.len())
            .map(|col| matrix.iter().map(|row| row[col]).fold(0.0, f64::max))
            .collect();

        let row_avg = row_maxes.iter().sum::<f64>() / row_maxes.len() as f64;
        let col_avg = col_maxes.iter().sum::<f64>() / col_maxes.len() as f64;

        match params.combine {
            CombineMethod::FunSimAvg => (row_avg + col_avg) / 2.0,
            CombineMethod::FunSimMax => row_avg.max(col_avg),
            CombineMethod::Bma => {
                (row_maxes.iter().sum::<f64>() + col_maxes.iter().sum::<f64>())
                    / (row_maxes.len() + col_maxes.len()) as f64
            }
        }
    }
}
