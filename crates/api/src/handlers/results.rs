//! Handlers for the `/results` resource.

use axum::extract::{Path, State};
use axum::Json;
use vibevote_core::error::CoreError;
use vibevote_core::types::DbId;
use vibevote_db::models::appeal::Appeal;
use vibevote_db::models::results::{ResultsSummaryRow, VotingStats};
use vibevote_db::repositories::{AppealRepo, ResultsRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/results
///
/// Recompute the appeal snapshot, then return the ranking. A failed
/// recompute leaves the previous snapshot in place and is only logged.
pub async fn summary(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ResultsSummaryRow>>>> {
    if let Err(e) = AppealRepo::recompute(&state.pool, &state.config.appeal).await {
        tracing::error!(error = %e, "Appeal recompute failed, serving previous snapshot");
    }
    let rows = ResultsRepo::summary(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/results/stats
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<DataResponse<VotingStats>>> {
    let stats = ResultsRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/results/movies/{id}
///
/// The last computed snapshot for one movie.
pub async fn movie_appeal(
    State(state): State<AppState>,
    Path(movie_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Appeal>>> {
    let appeal = AppealRepo::find_for_movie(&state.pool, movie_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Appeal",
            id: movie_id,
        }))?;
    Ok(Json(DataResponse { data: appeal }))
}
