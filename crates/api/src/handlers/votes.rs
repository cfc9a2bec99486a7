//! Handlers for the voter-facing `/votes` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use vibevote_core::error::CoreError;
use vibevote_core::types::DbId;
use vibevote_core::vibe::{validate_vote, Judgment};
use vibevote_db::models::vote::{UpsertedVote, Vote};
use vibevote_db::repositories::{DeviceNameRepo, MovieRepo, VoteRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::voter::VoterIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /votes`.
///
/// ```json
/// { "movie_id": 4, "judgment": { "kind": "seen", "rating": 5 } }
/// ```
#[derive(Debug, Deserialize)]
pub struct SubmitVoteRequest {
    pub movie_id: DbId,
    pub judgment: Judgment,
}

/// POST /api/v1/votes
///
/// Upsert the caller's vote. Answers 201 for a first vote and 200 when an
/// earlier vote by the same name and device was replaced.
pub async fn submit(
    State(state): State<AppState>,
    voter: VoterIdentity,
    payload: Result<Json<SubmitVoteRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<UpsertedVote>>)> {
    let Json(input) = payload?;
    let vote = validate_vote(
        input.movie_id,
        &voter.user_name,
        &voter.device_id,
        input.judgment,
    )?;

    if !MovieRepo::exists(&state.pool, vote.movie_id).await? {
        return Err(AppError::Core(CoreError::movie_not_found(vote.movie_id)));
    }

    let stored = VoteRepo::upsert(&state.pool, &vote).await?;

    // The device history only feeds name suggestions.
    if let Err(e) = DeviceNameRepo::record(&state.pool, &voter.device_id, &voter.user_name).await {
        tracing::warn!(error = %e, device_id = %voter.device_id, "Failed to record device name");
    }

    tracing::info!(
        movie_id = vote.movie_id,
        user_name = %vote.user_name,
        device_id = %vote.device_id,
        vibe = vote.vibe.get(),
        seen = vote.seen,
        created = stored.created,
        "Vote recorded",
    );

    let status = if stored.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DataResponse { data: stored })))
}

/// GET /api/v1/votes/mine
pub async fn list_mine(
    State(state): State<AppState>,
    voter: VoterIdentity,
) -> AppResult<Json<DataResponse<Vec<Vote>>>> {
    let votes = VoteRepo::list_for_voter(&state.pool, &voter.user_name, &voter.device_id).await?;
    Ok(Json(DataResponse { data: votes }))
}

/// GET /api/v1/votes/mine/{movie_id}
pub async fn get_mine(
    State(state): State<AppState>,
    voter: VoterIdentity,
    Path(movie_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vote>>> {
    let vote = VoteRepo::find_by_key(&state.pool, movie_id, &voter.user_name, &voter.device_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Vote",
            id: movie_id,
        }))?;
    Ok(Json(DataResponse { data: vote }))
}
