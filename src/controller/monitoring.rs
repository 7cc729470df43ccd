//! Readiness and liveness routes.

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::app::AppContext;
use crate::Result;

/// Represents the health status of the application.
#[derive(Serialize)]
pub struct Health {
    pub ok: bool,
}

pub async fn ping() -> Result<Json<Health>> {
    Ok(Json(Health { ok: true }))
}

pub async fn health() -> Result<Json<Health>> {
    Ok(Json(Health { ok: true }))
}

pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/_ping", get(ping))
        .route("/_health", get(health))
}
