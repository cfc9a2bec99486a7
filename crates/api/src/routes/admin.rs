//! Route definitions for `/admin`. Every handler requires an admin token.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /votes                -> list_votes
/// DELETE /votes                -> delete_all_votes
/// GET    /voters               -> list_voters
/// DELETE /voters               -> delete_voter (?user_name=&device_id=)
/// GET    /movies/{id}/votes    -> list_movie_votes
/// GET    /appeal               -> list_appeals
/// POST   /appeal/recompute     -> recompute_appeal
/// GET    /duplicates           -> list_duplicates
/// POST   /duplicates/cleanup   -> cleanup_duplicates
/// POST   /reset                -> reset_database
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/votes",
            get(admin::list_votes).delete(admin::delete_all_votes),
        )
        .route(
            "/voters",
            get(admin::list_voters).delete(admin::delete_voter),
        )
        .route("/movies/{id}/votes", get(admin::list_movie_votes))
        .route("/appeal", get(admin::list_appeals))
        .route("/appeal/recompute", post(admin::recompute_appeal))
        .route("/duplicates", get(admin::list_duplicates))
        .route("/duplicates/cleanup", post(admin::cleanup_duplicates))
        .route("/reset", post(admin::reset_database))
}
