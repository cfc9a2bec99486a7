//! Route definitions for the `/votes` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::votes;
use crate::state::AppState;

/// Routes mounted at `/votes`. All require the voter headers.
///
/// ```text
/// POST /                  -> submit
/// GET  /mine              -> list_mine
/// GET  /mine/{movie_id}   -> get_mine
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(votes::submit))
        .route("/mine", get(votes::list_mine))
        .route("/mine/{movie_id}", get(votes::get_mine))
}
