//! Single-term routes.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::views::{DiseaseView, GeneView, NeighbourhoodView, TermView};
use crate::app::AppContext;
use crate::query::{neighbourhood, resolve_term};
use crate::Result;

#[derive(Debug, Default, Deserialize)]
pub struct VerboseParams {
    #[serde(default)]
    pub verbose: bool,
}

/// `GET /term/{id}`
pub async fn info(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Query(params): Query<VerboseParams>,
) -> Result<Json<TermView>> {
    let term = resolve_term(&ctx.ontology, &id)?;
    Ok(Json(TermView::build(&ctx.ontology, term, params.verbose)))
}

/// `GET /term/{id}/parents`
pub async fn parents(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Query(params): Query<VerboseParams>,
) -> Result<Json<Vec<TermView>>> {
    let term = resolve_term(&ctx.ontology, &id)?;
    let views = ctx
        .ontology
        .parents_of(term)
        .into_iter()
        .map(|parent| TermView::build(&ctx.ontology, parent, params.verbose))
        .collect();
    Ok(Json(views))
}

/// `GET /term/{id}/children`
pub async fn children(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Query(params): Query<VerboseParams>,
) -> Result<Json<Vec<TermView>>> {
    let term = resolve_term(&ctx.ontology, &id)?;
    let views = ctx
        .ontology
        .children_of(term)
        .into_iter()
        .map(|child| TermView::build(&ctx.ontology, child, params.verbose))
        .collect();
    Ok(Json(views))
}

/// `GET /term/{id}/neighbours`
pub async fn neighbours(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Query(params): Query<VerboseParams>,
) -> Result<Json<NeighbourhoodView>> {
    let term = resolve_term(&ctx.ontology, &id)?;
    let hood = neighbourhood(&ctx.ontology, term);
    Ok(Json(NeighbourhoodView::new(
        &ctx.ontology,
        &hood,
        params.verbose,
    )))
}

/// `GET /term/{id}/genes`
pub async fn genes(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<Vec<GeneView>>> {
    let term = resolve_term(&ctx.ontology, &id)?;
    let views = term
        .genes()
        .iter()
        .filter_map(|gene_id| ctx.ontology.gene(*gene_id))
        .map(GeneView::new)
        .collect();
    Ok(Json(views))
}

/// `GET /term/{id}/omim`
pub async fn omim_diseases(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<Vec<DiseaseView>>> {
    let term = resolve_term(&ctx.ontology, &id)?;
    let views = term
        .diseases()
        .iter()
        .filter_map(|disease_id| ctx.ontology.disease(*disease_id))
        .map(DiseaseView::new)
        .collect();
    Ok(Json(views))
}

pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/{id}", get(info))
        .route("/{id}/parents", get(parents))
        .route("/{id}/children", get(children))
        .route("/{id}/neighbours", get(neighbours))
        .route("/{id}/genes", get(genes))
        .route("/{id}/omim", get(omim_diseases))
}
