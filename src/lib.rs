//! Query orchestration service over a pre-built phenotype ontology.
//!
//! The store is loaded once at boot into an immutable arena; every request
//! works on borrowed term references and the scoring engines behind the
//! [`stats::Engines`] handles.

pub mod app;
pub mod config;
pub mod controller;
pub mod errors;
pub mod ontology;
pub mod query;
pub mod stats;

pub use app::{create_context, AppContext};
pub use errors::{Error, Result};
