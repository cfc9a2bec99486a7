pub mod admin;
pub mod auth;
pub mod health;
pub mod identity;
pub mod movies;
pub mod results;
pub mod votes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                       login (public)
/// /auth/me                          current admin
///
/// /movies                           list, create (admin)
/// /movies/{id}                      get, update (admin), delete (admin)
///
/// /votes                            submit (voter headers)
/// /votes/mine                       caller's votes
/// /votes/mine/{movie_id}            caller's vote on one movie
///
/// /identity/check-name              name suggestions for onboarding
/// /identity/confirm-name            bind a name to the device
/// /identity/me                      device name history
///
/// /results                          recompute + ranked summary
/// /results/stats                    dashboard counters
/// /results/movies/{id}              snapshot for one movie
///
/// /admin/votes                      list, delete all
/// /admin/voters                     per (name, device) stats
/// /admin/movies/{id}/votes          votes on one movie
/// /admin/appeal                     current snapshot
/// /admin/appeal/recompute           recompute now
/// /admin/duplicates                 planned duplicate groups
/// /admin/duplicates/cleanup         merge duplicates
/// /admin/reset                      wipe poll data
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/movies", movies::router())
        .nest("/votes", votes::router())
        .nest("/identity", identity::router())
        .nest("/results", results::router())
        .nest("/admin", admin::router())
}
