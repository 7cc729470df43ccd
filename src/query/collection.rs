//! Identifier resolution and set building.
//!
//! Textual identifiers arrive in three shapes: a bare integer, a namespaced
//! string id (`HP:0000123`) or an exact term name. Resolution is tagged and
//! explicit; there is no runtime duck-typing.

use crate::ontology::{Ontology, Term, TermId};
use crate::{Error, Result};

/// Resolves one trimmed token to a term reference.
///
/// Integer parse is attempted first, then the namespaced string id, then an
/// exact name lookup. Pure read, no side effects.
pub fn resolve_term<'o>(ontology: &'o Ontology, token: &str) -> Result<&'o Term> {
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::InvalidIdentifier {
            token: token.to_string(),
        });
    }

    if let Ok(numeric) = token.parse::<u32>() {
        return ontology.term(TermId(numeric)).ok_or_else(|| not_found(token));
    }

    if let Some(suffix) = token.strip_prefix("HP:") {
        let numeric: u32 = suffix.parse().map_err(|_| Error::InvalidIdentifier {
            token: token.to_string(),
        })?;
        return ontology.term(TermId(numeric)).ok_or_else(|| not_found(token));
    }

    ontology
        .term_by_name(token)
        .ok_or_else(|| not_found(token))
}

fn not_found(token: &str) -> Error {
    Error::TermNotFound {
        token: token.to_string(),
    }
}

/// Ordered, duplicate-free container of term references.
///
/// Insertion order equals resolution order; membership is decided by term
/// id, never by value.
#[derive(Clone, Debug, Default)]
pub struct TermCollection<'o> {
    terms: Vec<&'o Term>,
}

impl<'o> TermCollection<'o> {
    #[must_use]
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Builds a collection from a comma-separated query string.
    ///
    /// Tokens are resolved in order and the first failure aborts the whole
    /// build; a partially resolved collection is never returned. Duplicate
    /// tokens collapse to the first occurrence.
    pub fn from_query(ontology: &'o Ontology, raw: &str) -> Result<Self> {
        let mut collection = Self::new();
        for token in raw.split(',') {
            collection.insert(resolve_term(ontology, token)?);
        }
        Ok(collection)
    }

    /// Builds a collection from numeric term ids, e.g. the annotated terms
    /// of a disease. Unknown ids surface as `TermNotFound`.
    pub fn from_ids(ontology: &'o Ontology, ids: &[TermId]) -> Result<Self> {
        let mut collection = Self::new();
        for id in ids {
            let term = ontology
                .term(*id)
                .ok_or_else(|| not_found(&id.value().to_string()))?;
            collection.insert(term);
        }
        Ok(collection)
    }

    /// Inserts a term unless already present. Returns whether it was added.
    pub fn insert(&mut self, term: &'o Term) -> bool {
        if self.contains(term.id()) {
            return false;
        }
        self.terms.push(term);
        true
    }

    #[must_use]
    pub fn contains(&self, id: TermId) -> bool {
        self.terms.iter().any(|term| term.id() == id)
    }

    #[must_use]
    pub fn terms(&self) -> &[&'o Term] {
        &self.terms
    }

    pub fn iter(&self) -> impl Iterator<Item = &'o Term> + '_ {
        self.terms.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
