//! Route definitions for the `/results` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::results;
use crate::state::AppState;

/// Routes mounted at `/results`.
///
/// ```text
/// GET /              -> summary
/// GET /stats         -> stats
/// GET /movies/{id}   -> movie_appeal
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(results::summary))
        .route("/stats", get(results::stats))
        .route("/movies/{id}", get(results::movie_appeal))
}
