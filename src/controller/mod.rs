//! HTTP surface.
//!
//! Each submodule owns its routes and exposes a `routes()` builder; this
//! module assembles the full router and the shared middleware stack.

pub mod annotations;
pub mod monitoring;
pub mod term;
pub mod terms;
pub mod views;

use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::app::AppContext;
use crate::Result;

/// Builds the application router with the shared middleware stack.
pub fn router(ctx: AppContext) -> Result<Router> {
    let cors = ctx.settings.cors()?;

    let router = Router::new()
        .nest("/term", term::routes())
        .nest("/terms", terms::routes())
        .merge(annotations::routes())
        .merge(monitoring::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(ctx);

    Ok(router)
}
