//! Shared fixture store and test server for the HTTP tests.

use std::sync::Arc;

use axum_test::TestServer;

use hpoapi::config::Settings;
use hpoapi::ontology::{
    DiseaseSeed, GeneSeed, InformationContent, Ontology, OntologySeed, TermSeed,
};
use hpoapi::stats::Engines;
use hpoapi::AppContext;

fn term(id: u32, name: &str, parents: Vec<u32>, ic: f64) -> TermSeed {
    TermSeed {
        id,
        name: name.into(),
        definition: Some(format!("definition of {name}")),
        comment: None,
        synonyms: vec![],
        xrefs: vec![],
        parents,
        ic: InformationContent {
            gene: ic,
            omim: ic,
        },
    }
}

/// Small diamond-shaped ontology with two genes and two diseases.
#[must_use]
pub fn fixture_store() -> Arc<Ontology> {
    let seed = OntologySeed {
        terms: vec![
            term(1, "Test root", vec![], 0.0),
            term(11, "Test child level 1-1", vec![1], 1.0),
            term(12, "Test child level 1-2", vec![1], 1.0),
            term(13, "Test child level 1-3", vec![1], 1.0),
            term(21, "Test child level 2-1", vec![11], 2.0),
            term(31, "Test child level 3-1", vec![21, 12], 3.0),
            term(41, "Test child level 4-1", vec![31], 4.0),
        ],
        genes: vec![
            GeneSeed {
                id: 1,
                symbol: "Gene1".into(),
                terms: vec![41],
            },
            GeneSeed {
                id: 2,
                symbol: "Gene2".into(),
                terms: vec![31],
            },
        ],
        diseases: vec![
            DiseaseSeed {
                id: 600001,
                name: "Disease1".into(),
                terms: vec![13, 21],
            },
            DiseaseSeed {
                id: 600002,
                name: "Disease2".into(),
                terms: vec![13],
            },
        ],
    };
    Arc::new(Ontology::from_seed(seed).expect("fixture store"))
}

#[must_use]
pub fn context() -> AppContext {
    let ontology = fixture_store();
    AppContext {
        settings: Arc::new(Settings::default()),
        ontology: Arc::clone(&ontology),
        engines: Engines::native(ontology),
    }
}

#[must_use]
pub fn server() -> TestServer {
    let router = hpoapi::controller::router(context()).expect("router");
    TestServer::new(router).expect("test server")
}
