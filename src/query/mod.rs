//! Read-side query operations over the ontology store.
//!
//! Everything in here is a pure function (or a thin container) over borrowed
//! term references; handlers own the request scope, the store outlives it.

pub mod algebra;
pub mod batch;
pub mod collection;
pub mod hierarchy;
pub mod neighbours;
pub mod suggest;

pub use algebra::{combine_ids, diseases, genes, SetOperation};
pub use batch::{run_batch, BatchItem, BatchOutcome};
pub use collection::{resolve_term, TermCollection};
pub use hierarchy::{project, HierarchyRecord};
pub use neighbours::{neighbourhood, Neighbourhood};
pub use suggest::{suggest, SuggestCutoffs};
