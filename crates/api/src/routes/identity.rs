//! Route definitions for the `/identity` onboarding endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::identity;
use crate::state::AppState;

/// Routes mounted at `/identity`. All require `X-Device-Id`.
///
/// ```text
/// POST /check-name    -> check
/// POST /confirm-name  -> confirm
/// GET  /me            -> me
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/check-name", post(identity::check))
        .route("/confirm-name", post(identity::confirm))
        .route("/me", get(identity::me))
}
