//! Admin-only handlers: vote inspection, appeal recompute, duplicate
//! cleanup and database reset.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use vibevote_core::duplicate_movies::{CleanupSummary, DuplicateGroup};
use vibevote_core::error::CoreError;
use vibevote_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use vibevote_core::types::DbId;
use vibevote_core::vibe::validate_voter_name;
use vibevote_db::models::appeal::Appeal;
use vibevote_db::models::vote::{DeletedVoter, Vote, VoterSummary};
use vibevote_db::repositories::maintenance_repo::ResetSummary;
use vibevote_db::repositories::{
    AppealRepo, DuplicateMovieRepo, MaintenanceRepo, MovieRepo, VoteRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminUser;
use crate::query::{DuplicateParams, PaginationParams, VoterKeyParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for `DELETE /admin/votes`.
#[derive(Debug, Serialize)]
pub struct DeletedVotes {
    pub deleted: u64,
}

// ---------------------------------------------------------------------------
// Votes and voters
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/votes
pub async fn list_votes(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Vote>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let votes = VoteRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: votes }))
}

/// DELETE /api/v1/admin/votes
///
/// Removes every vote and the appeal snapshot.
pub async fn delete_all_votes(
    State(state): State<AppState>,
    admin: AdminUser,
) -> AppResult<Json<DataResponse<DeletedVotes>>> {
    let deleted = VoteRepo::delete_all(&state.pool).await?;
    tracing::warn!(deleted, admin = %admin.username, "All votes deleted");
    Ok(Json(DataResponse {
        data: DeletedVotes { deleted },
    }))
}

/// GET /api/v1/admin/voters
pub async fn list_voters(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<DataResponse<Vec<VoterSummary>>>> {
    let voters = VoteRepo::list_voters(&state.pool).await?;
    Ok(Json(DataResponse { data: voters }))
}

/// DELETE /api/v1/admin/voters?user_name=&device_id=
///
/// Deletes one voter's votes and their name on that device.
pub async fn delete_voter(
    State(state): State<AppState>,
    admin: AdminUser,
    Query(params): Query<VoterKeyParams>,
) -> AppResult<Json<DataResponse<DeletedVoter>>> {
    let user_name = validate_voter_name(&params.user_name)?;
    if params.device_id.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Device id is required".into(),
        )));
    }

    let deleted = VoteRepo::delete_for_voter(&state.pool, &user_name, &params.device_id).await?;
    tracing::warn!(
        user_name = %user_name,
        device_id = %params.device_id,
        votes = deleted.votes,
        admin = %admin.username,
        "Voter deleted",
    );
    Ok(Json(DataResponse { data: deleted }))
}

/// GET /api/v1/admin/movies/{id}/votes
pub async fn list_movie_votes(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(movie_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Vote>>>> {
    if !MovieRepo::exists(&state.pool, movie_id).await? {
        return Err(AppError::Core(CoreError::movie_not_found(movie_id)));
    }
    let votes = VoteRepo::list_for_movie(&state.pool, movie_id).await?;
    Ok(Json(DataResponse { data: votes }))
}

// ---------------------------------------------------------------------------
// Appeal snapshot
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/appeal/recompute
///
/// Unlike `GET /results`, a failure here is reported to the caller.
pub async fn recompute_appeal(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<DataResponse<Vec<Appeal>>>> {
    let appeals = AppealRepo::recompute(&state.pool, &state.config.appeal).await?;
    Ok(Json(DataResponse { data: appeals }))
}

/// GET /api/v1/admin/appeal
pub async fn list_appeals(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<DataResponse<Vec<Appeal>>>> {
    let appeals = AppealRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: appeals }))
}

// ---------------------------------------------------------------------------
// Duplicates and reset
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/duplicates
pub async fn list_duplicates(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(params): Query<DuplicateParams>,
) -> AppResult<Json<DataResponse<Vec<DuplicateGroup>>>> {
    let groups = DuplicateMovieRepo::find_groups(&state.pool, params.match_year).await?;
    Ok(Json(DataResponse { data: groups }))
}

/// POST /api/v1/admin/duplicates/cleanup
pub async fn cleanup_duplicates(
    State(state): State<AppState>,
    admin: AdminUser,
    Query(params): Query<DuplicateParams>,
) -> AppResult<Json<DataResponse<CleanupSummary>>> {
    let summary = DuplicateMovieRepo::cleanup(&state.pool, params.match_year).await?;
    tracing::info!(
        groups = summary.groups_merged,
        removed = summary.movies_removed,
        moved = summary.votes_moved,
        admin = %admin.username,
        "Duplicate cleanup finished",
    );
    Ok(Json(DataResponse { data: summary }))
}

/// POST /api/v1/admin/reset
///
/// Deletes all movies, votes, appeals and device names. Admin accounts stay.
pub async fn reset_database(
    State(state): State<AppState>,
    admin: AdminUser,
) -> AppResult<Json<DataResponse<ResetSummary>>> {
    let summary = MaintenanceRepo::reset(&state.pool).await?;
    tracing::warn!(?summary, admin = %admin.username, "Database reset");
    Ok(Json(DataResponse { data: summary }))
}
