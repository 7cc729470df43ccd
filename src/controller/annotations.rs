//! Disease and gene annotation routes, including the comparisons of a term
//! set against the annotated terms of diseases and genes.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::term::VerboseParams;
use super::terms::ScoringQueryParams;
use super::views::{
    BatchItemView, BatchSimilarityView, DiseaseSimilarityView, DiseaseView, GeneSimilarityView,
    GeneView, TermView,
};
use crate::app::AppContext;
use crate::ontology::{Disease, Gene};
use crate::query::TermCollection;
use crate::stats::SimilarityParams;
use crate::{Error, Result};

/// `GET /omim/{id}`
pub async fn omim_disease(
    State(ctx): State<AppContext>,
    Path(id): Path<u32>,
    Query(params): Query<VerboseParams>,
) -> Result<Json<DiseaseView>> {
    let disease = lookup_disease(&ctx, id)?;
    let view = if params.verbose {
        DiseaseView::verbose(&ctx.ontology, disease)
    } else {
        DiseaseView::new(disease)
    };
    Ok(Json(view))
}

/// `GET /gene/{id}`
///
/// Accepts either the numeric gene id or the gene symbol.
pub async fn gene(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Query(params): Query<VerboseParams>,
) -> Result<Json<GeneView>> {
    let gene = lookup_gene(&ctx, &id)?;
    let view = if params.verbose {
        GeneView::verbose(&ctx.ontology, gene)
    } else {
        GeneView::new(gene)
    };
    Ok(Json(view))
}

fn lookup_disease(ctx: &AppContext, id: u32) -> Result<&Disease> {
    ctx.ontology.disease(id).ok_or(Error::UpstreamEntityNotFound {
        entity: "OMIM disease",
    })
}

fn lookup_gene<'c>(ctx: &'c AppContext, id: &str) -> Result<&'c Gene> {
    let gene = match id.parse::<u32>() {
        Ok(numeric) => ctx.ontology.gene(numeric),
        Err(_) => ctx.ontology.gene_by_symbol(id),
    };
    gene.ok_or(Error::UpstreamEntityNotFound { entity: "Gene" })
}

#[derive(Debug, Deserialize)]
pub struct DiseaseSimilarityParams {
    pub set1: String,
    pub omim: u32,
    pub method: Option<String>,
    pub combine: Option<String>,
    pub kind: Option<String>,
}

/// `GET /similarity/omim`
pub async fn disease_similarity(
    State(ctx): State<AppContext>,
    Query(params): Query<DiseaseSimilarityParams>,
) -> Result<Json<DiseaseSimilarityView>> {
    let scoring = SimilarityParams::parse(
        params.method.as_deref(),
        params.combine.as_deref(),
        params.kind.as_deref(),
    )?;
    let set1 = TermCollection::from_query(&ctx.ontology, &params.set1)?;
    let disease = lookup_disease(&ctx, params.omim)?;
    let set2 = TermCollection::from_ids(&ctx.ontology, disease.terms())?;

    let similarity = ctx.engines.similarity.score(&set1, &set2, &scoring);
    Ok(Json(DiseaseSimilarityView {
        set1: set1.iter().map(TermView::new).collect(),
        set2: set2.iter().map(TermView::new).collect(),
        omim: DiseaseView::new(disease),
        similarity,
    }))
}

#[derive(Debug, Deserialize)]
pub struct GeneSimilarityParams {
    pub set1: String,
    pub gene: String,
    pub method: Option<String>,
    pub combine: Option<String>,
    pub kind: Option<String>,
}

/// `GET /similarity/gene`
pub async fn gene_similarity(
    State(ctx): State<AppContext>,
    Query(params): Query<GeneSimilarityParams>,
) -> Result<Json<GeneSimilarityView>> {
    let scoring = SimilarityParams::parse(
        params.method.as_deref(),
        params.combine.as_deref(),
        params.kind.as_deref(),
    )?;
    let set1 = TermCollection::from_query(&ctx.ontology, &params.set1)?;
    let gene = lookup_gene(&ctx, &params.gene)?;
    let set2 = TermCollection::from_ids(&ctx.ontology, gene.terms())?;

    let similarity = ctx.engines.similarity.score(&set1, &set2, &scoring);
    Ok(Json(GeneSimilarityView {
        set1: set1.iter().map(TermView::new).collect(),
        set2: set2.iter().map(TermView::new).collect(),
        gene: GeneView::new(gene),
        similarity,
    }))
}

#[derive(Debug, Deserialize)]
pub struct DiseaseBatchBody {
    pub set1: String,
    pub omim_diseases: Vec<u32>,
    pub method: Option<String>,
    pub combine: Option<String>,
    pub kind: Option<String>,
}

/// `POST /similarity/omim`
///
/// Unknown disease ids are reported inline; they never fail the batch.
pub async fn disease_batch_similarity(
    State(ctx): State<AppContext>,
    Query(query): Query<ScoringQueryParams>,
    Json(body): Json<DiseaseBatchBody>,
) -> Result<Json<BatchSimilarityView>> {
    let scoring = SimilarityParams::parse(
        body.method.or(query.method).as_deref(),
        body.combine.or(query.combine).as_deref(),
        body.kind.or(query.kind).as_deref(),
    )?;
    let set1 = TermCollection::from_query(&ctx.ontology, &body.set1)?;

    let mut rows = Vec::with_capacity(body.omim_diseases.len());
    for id in body.omim_diseases {
        match ctx.ontology.disease(id) {
            Some(disease) => rows.push(score_row(
                &ctx,
                &set1,
                id.to_string(),
                disease.terms(),
                &scoring,
            )?),
            None => rows.push(BatchItemView {
                name: id.to_string(),
                similarity: None,
                error: Some(format!("unknown Omim disease {id}")),
            }),
        }
    }

    Ok(Json(BatchSimilarityView {
        set1: set1.iter().map(TermView::new).collect(),
        other_sets: rows,
    }))
}

#[derive(Debug, Deserialize)]
pub struct GeneBatchBody {
    pub set1: String,
    pub genes: Vec<String>,
    pub method: Option<String>,
    pub combine: Option<String>,
    pub kind: Option<String>,
}

/// `POST /similarity/gene`
pub async fn gene_batch_similarity(
    State(ctx): State<AppContext>,
    Query(query): Query<ScoringQueryParams>,
    Json(body): Json<GeneBatchBody>,
) -> Result<Json<BatchSimilarityView>> {
    let scoring = SimilarityParams::parse(
        body.method.or(query.method).as_deref(),
        body.combine.or(query.combine).as_deref(),
        body.kind.or(query.kind).as_deref(),
    )?;
    let set1 = TermCollection::from_query(&ctx.ontology, &body.set1)?;

    let mut rows = Vec::with_capacity(body.genes.len());
    for symbol in body.genes {
        match ctx.ontology.gene_by_symbol(&symbol) {
            Some(gene) => rows.push(score_row(&ctx, &set1, symbol, gene.terms(), &scoring)?),
            None => rows.push(BatchItemView {
                name: symbol.clone(),
                similarity: None,
                error: Some(format!("unknown gene {symbol}")),
            }),
        }
    }

    Ok(Json(BatchSimilarityView {
        set1: set1.iter().map(TermView::new).collect(),
        other_sets: rows,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AllSimilarityParams {
    pub set1: String,
    pub method: Option<String>,
    pub combine: Option<String>,
    pub kind: Option<String>,
}

/// `GET /similarity/omim/all`
pub async fn all_disease_similarity(
    State(ctx): State<AppContext>,
    Query(params): Query<AllSimilarityParams>,
) -> Result<Json<BatchSimilarityView>> {
    let scoring = SimilarityParams::parse(
        params.method.as_deref(),
        params.combine.as_deref(),
        params.kind.as_deref(),
    )?;
    let set1 = TermCollection::from_query(&ctx.ontology, &params.set1)?;

    let rows = ctx
        .ontology
        .diseases()
        .map(|disease| score_row(&ctx, &set1, disease.id().to_string(), disease.terms(), &scoring))
        .collect::<Result<Vec<_>>>()?;
    Ok(Json(BatchSimilarityView {
        set1: set1.iter().map(TermView::new).collect(),
        other_sets: rows,
    }))
}

/// `GET /similarity/gene/all`
pub async fn all_gene_similarity(
    State(ctx): State<AppContext>,
    Query(params): Query<AllSimilarityParams>,
) -> Result<Json<BatchSimilarityView>> {
    let scoring = SimilarityParams::parse(
        params.method.as_deref(),
        params.combine.as_deref(),
        params.kind.as_deref(),
    )?;
    let set1 = TermCollection::from_query(&ctx.ontology, &params.set1)?;

    let rows = ctx
        .ontology
        .genes()
        .map(|gene| score_row(&ctx, &set1, gene.symbol().to_string(), gene.terms(), &scoring))
        .collect::<Result<Vec<_>>>()?;
    Ok(Json(BatchSimilarityView {
        set1: set1.iter().map(TermView::new).collect(),
        other_sets: rows,
    }))
}

fn score_row(
    ctx: &AppContext,
    set1: &TermCollection<'_>,
    name: String,
    term_ids: &[crate::ontology::TermId],
    scoring: &SimilarityParams,
) -> Result<BatchItemView> {
    let set2 = TermCollection::from_ids(&ctx.ontology, term_ids)?;
    Ok(BatchItemView {
        name,
        similarity: Some(ctx.engines.similarity.score(set1, &set2, scoring)),
        error: None,
    })
}

pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/omim/{id}", get(omim_disease))
        .route("/gene/{id}", get(gene))
        .route(
            "/similarity/omim",
            get(disease_similarity).post(disease_batch_similarity),
        )
        .route(
            "/similarity/gene",
            get(gene_similarity).post(gene_batch_similarity),
        )
        .route("/similarity/omim/all", get(all_disease_similarity))
        .route("/similarity/gene/all", get(all_gene_similarity))
}
