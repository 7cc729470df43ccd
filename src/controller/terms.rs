//! Multi-term routes: search, set algebra, similarity, enrichment,
//! suggestions and the hierarchy export.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::views::{
    BatchItemView, BatchSimilarityView, DiseaseView, EnrichedDiseaseView, EnrichedGeneView,
    GeneView, HierarchyRecordView, SimilarityView, TermView,
};
use crate::app::AppContext;
use crate::query::{
    self, project, run_batch, BatchItem, SetOperation, SuggestCutoffs, TermCollection,
};
use crate::stats::{EnrichmentMethod, SimilarityParams};
use crate::Result;

fn default_limit() -> usize {
    10
}

fn default_cutoff() -> usize {
    5
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub verbose: bool,
}

/// `GET /terms/search/{query}`
pub async fn search(
    State(ctx): State<AppContext>,
    Path(query): Path<String>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<TermView>>> {
    let views = ctx
        .ontology
        .search(&query)
        .skip(params.offset)
        .take(params.limit)
        .map(|term| TermView::build(&ctx.ontology, term, params.verbose))
        .collect();
    Ok(Json(views))
}

#[derive(Debug, Deserialize)]
pub struct SetParams {
    pub set1: String,
}

/// `GET /terms/intersect/omim`
pub async fn intersect_omim(
    State(ctx): State<AppContext>,
    Query(params): Query<SetParams>,
) -> Result<Json<Vec<DiseaseView>>> {
    annotation_diseases(&ctx, &params.set1, SetOperation::Intersection)
}

/// `GET /terms/union/omim`
pub async fn union_omim(
    State(ctx): State<AppContext>,
    Query(params): Query<SetParams>,
) -> Result<Json<Vec<DiseaseView>>> {
    annotation_diseases(&ctx, &params.set1, SetOperation::Union)
}

/// `GET /terms/intersect/genes`
pub async fn intersect_genes(
    State(ctx): State<AppContext>,
    Query(params): Query<SetParams>,
) -> Result<Json<Vec<GeneView>>> {
    annotation_genes(&ctx, &params.set1, SetOperation::Intersection)
}

/// `GET /terms/union/genes`
pub async fn union_genes(
    State(ctx): State<AppContext>,
    Query(params): Query<SetParams>,
) -> Result<Json<Vec<GeneView>>> {
    annotation_genes(&ctx, &params.set1, SetOperation::Union)
}

fn annotation_diseases(
    ctx: &AppContext,
    raw_set: &str,
    op: SetOperation,
) -> Result<Json<Vec<DiseaseView>>> {
    let set = TermCollection::from_query(&ctx.ontology, raw_set)?;
    let views = query::diseases(&ctx.ontology, &set, op)
        .into_iter()
        .map(DiseaseView::new)
        .collect();
    Ok(Json(views))
}

fn annotation_genes(
    ctx: &AppContext,
    raw_set: &str,
    op: SetOperation,
) -> Result<Json<Vec<GeneView>>> {
    let set = TermCollection::from_query(&ctx.ontology, raw_set)?;
    let views = query::genes(&ctx.ontology, &set, op)
        .into_iter()
        .map(GeneView::new)
        .collect();
    Ok(Json(views))
}

#[derive(Debug, Deserialize)]
pub struct SimilarityGetParams {
    pub set1: String,
    pub set2: String,
    pub method: Option<String>,
    pub combine: Option<String>,
    pub kind: Option<String>,
}

/// `GET /terms/similarity`
pub async fn similarity(
    State(ctx): State<AppContext>,
    Query(params): Query<SimilarityGetParams>,
) -> Result<Json<SimilarityView>> {
    let scoring = SimilarityParams::parse(
        params.method.as_deref(),
        params.combine.as_deref(),
        params.kind.as_deref(),
    )?;
    let set1 = TermCollection::from_query(&ctx.ontology, &params.set1)?;
    let set2 = TermCollection::from_query(&ctx.ontology, &params.set2)?;

    let similarity = ctx.engines.similarity.score(&set1, &set2, &scoring);
    Ok(Json(SimilarityView {
        set1: set1.iter().map(TermView::new).collect(),
        set2: set2.iter().map(TermView::new).collect(),
        similarity,
    }))
}

#[derive(Debug, Deserialize)]
pub struct NamedSetBody {
    pub name: String,
    pub set2: String,
}

#[derive(Debug, Deserialize)]
pub struct BatchSimilarityBody {
    pub set1: String,
    pub other_sets: Vec<NamedSetBody>,
    pub method: Option<String>,
    pub combine: Option<String>,
    pub kind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScoringQueryParams {
    pub method: Option<String>,
    pub combine: Option<String>,
    pub kind: Option<String>,
}

/// `POST /terms/similarity`
///
/// Scores `set1` against every named candidate set. A candidate set that
/// fails to resolve is reported inline and never fails the batch. Scoring
/// parameters may arrive in the body or the query string; the body wins.
pub async fn batch_similarity(
    State(ctx): State<AppContext>,
    Query(query): Query<ScoringQueryParams>,
    Json(body): Json<BatchSimilarityBody>,
) -> Result<Json<BatchSimilarityView>> {
    let scoring = SimilarityParams::parse(
        body.method.or(query.method).as_deref(),
        body.combine.or(query.combine).as_deref(),
        body.kind.or(query.kind).as_deref(),
    )?;
    let set1 = TermCollection::from_query(&ctx.ontology, &body.set1)?;
    let items: Vec<BatchItem> = body
        .other_sets
        .into_iter()
        .map(|named| BatchItem {
            name: named.name,
            raw_set: named.set2,
        })
        .collect();

    let outcomes = run_batch(
        &ctx.ontology,
        ctx.engines.similarity.as_ref(),
        &set1,
        &items,
        &scoring,
    )?;
    Ok(Json(BatchSimilarityView {
        set1: set1.iter().map(TermView::new).collect(),
        other_sets: outcomes.into_iter().map(BatchItemView::from).collect(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct EnrichmentParams {
    pub set1: String,
    pub method: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn enrichment_method(raw: Option<&str>) -> Result<EnrichmentMethod> {
    raw.map_or(Ok(EnrichmentMethod::default()), str::parse)
}

/// `GET /terms/enrichment/genes`
pub async fn gene_enrichment(
    State(ctx): State<AppContext>,
    Query(params): Query<EnrichmentParams>,
) -> Result<Json<Vec<EnrichedGeneView>>> {
    let method = enrichment_method(params.method.as_deref())?;
    let set = TermCollection::from_query(&ctx.ontology, &params.set1)?;

    let views = ctx
        .engines
        .gene_enrichment
        .enrich(method, &set)
        .into_iter()
        .skip(params.offset)
        .take(params.limit)
        .filter_map(|record| {
            ctx.ontology.gene(record.item).map(|gene| EnrichedGeneView {
                gene: GeneView::new(gene),
                count: record.count,
                enrichment: record.enrichment,
            })
        })
        .collect();
    Ok(Json(views))
}

/// `GET /terms/enrichment/omim`
pub async fn disease_enrichment(
    State(ctx): State<AppContext>,
    Query(params): Query<EnrichmentParams>,
) -> Result<Json<Vec<EnrichedDiseaseView>>> {
    let method = enrichment_method(params.method.as_deref())?;
    let set = TermCollection::from_query(&ctx.ontology, &params.set1)?;

    let views = ctx
        .engines
        .disease_enrichment
        .enrich(method, &set)
        .into_iter()
        .skip(params.offset)
        .take(params.limit)
        .filter_map(|record| {
            ctx.ontology
                .disease(record.item)
                .map(|disease| EnrichedDiseaseView {
                    omim: DiseaseView::new(disease),
                    count: record.count,
                    enrichment: record.enrichment,
                })
        })
        .collect();
    Ok(Json(views))
}

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    pub set1: String,
    pub method: Option<String>,
    #[serde(default = "default_cutoff")]
    pub n_genes: usize,
    #[serde(default = "default_cutoff")]
    pub n_omim: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

/// `GET /terms/suggest`
pub async fn suggest(
    State(ctx): State<AppContext>,
    Query(params): Query<SuggestParams>,
) -> Result<Json<Vec<TermView>>> {
    let method = enrichment_method(params.method.as_deref())?;
    let set = TermCollection::from_query(&ctx.ontology, &params.set1)?;

    let cutoffs = SuggestCutoffs {
        n_genes: params.n_genes,
        n_omim: params.n_omim,
        limit: params.limit,
        offset: params.offset,
    };
    let suggestions = query::suggest(&ctx.ontology, &ctx.engines, method, &set, cutoffs)?;
    Ok(Json(suggestions.into_iter().map(TermView::new).collect()))
}

/// `GET /terms/hierarchy`
pub async fn hierarchy(
    State(ctx): State<AppContext>,
    Query(params): Query<SetParams>,
) -> Result<Json<Vec<HierarchyRecordView>>> {
    let set = TermCollection::from_query(&ctx.ontology, &params.set1)?;
    let records = project(&ctx.ontology, &set)
        .into_iter()
        .map(HierarchyRecordView::from)
        .collect();
    Ok(Json(records))
}

pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/search/{query}", get(search))
        .route("/intersect/omim", get(intersect_omim))
        .route("/intersect/genes", get(intersect_genes))
        .route("/union/omim", get(union_omim))
        .route("/union/genes", get(union_genes))
        .route("/similarity", get(similarity).post(batch_similarity))
        .route("/enrichment/genes", get(gene_enrichment))
        .route("/enrichment/omim", get(disease_enrichment))
        .route("/suggest", get(suggest))
        .route("/hierarchy", get(hierarchy))
}
