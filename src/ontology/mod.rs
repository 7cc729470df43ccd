//! Ontology domain primitives and the read-only term store.
//!
//! The module keeps pure domain constructs only; query orchestration lives
//! in [`crate::query`] and transport concerns in [`crate::controller`].

pub mod entities;
pub mod store;

pub use entities::{
    AnnotationKind, Disease, Gene, InformationContent, InformationContentKind, Term, TermId,
};
pub use store::{DiseaseSeed, GeneSeed, Ontology, OntologySeed, StoreError, TermSeed};
