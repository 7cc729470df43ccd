//! Application context wiring.

use std::sync::Arc;

use crate::config::Settings;
use crate::ontology::{Ontology, OntologySeed};
use crate::stats::Engines;
use crate::Result;

/// Shared per-request state: immutable store, engines and settings.
#[derive(Clone)]
pub struct AppContext {
    pub settings: Arc<Settings>,
    pub ontology: Arc<Ontology>,
    pub engines: Engines,
}

impl AppContext {
    /// Context over an empty store. Useful for smoke tests and for booting
    /// without a data file.
    #[must_use]
    pub fn empty() -> Self {
        let ontology = Arc::new(
            Ontology::from_seed(OntologySeed::default()).unwrap_or_else(|_| Ontology::default()),
        );
        Self {
            settings: Arc::new(Settings::default()),
            ontology: Arc::clone(&ontology),
            engines: Engines::native(ontology),
        }
    }
}

/// Loads the store and wires the native engines.
pub fn create_context(settings: Settings) -> Result<AppContext> {
    let ontology = match &settings.data_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading ontology data");
            Arc::new(Ontology::from_json_file(path)?)
        }
        None => {
            tracing::warn!("no data file configured, starting with an empty store");
            Arc::new(Ontology::from_seed(OntologySeed::default())?)
        }
    };
    tracing::info!(
        terms = ontology.len(),
        genes = ontology.gene_count(),
        diseases = ontology.disease_count(),
        "ontology store ready"
    );

    let engines = Engines::native(Arc::clone(&ontology));
    Ok(AppContext {
        settings: Arc::new(settings),
        ontology,
        engines,
    })
}
