//! Handlers for the `/movies` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use vibevote_core::error::CoreError;
use vibevote_core::pagination::{clamp_limit, clamp_offset, MAX_PAGE_LIMIT};
use vibevote_core::types::DbId;
use vibevote_db::models::movie::{CreateMovie, Movie, UpdateMovie};
use vibevote_db::repositories::MovieRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/movies
///
/// Alphabetical; the page size defaults to `MOVIE_LIMIT`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Movie>>>> {
    let limit = clamp_limit(params.limit, state.config.movie_limit, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let movies = MovieRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: movies }))
}

/// GET /api/v1/movies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Movie>>> {
    let movie = MovieRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::movie_not_found(id)))?;
    Ok(Json(DataResponse { data: movie }))
}

/// POST /api/v1/movies (admin)
pub async fn create(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(input): Json<CreateMovie>,
) -> AppResult<(StatusCode, Json<DataResponse<Movie>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Movie title is required".into(),
        )));
    }
    if let Some(tmdb_id) = input.tmdb_id {
        if MovieRepo::find_by_tmdb_id(&state.pool, tmdb_id)
            .await?
            .is_some()
        {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "A movie with catalog id {tmdb_id} already exists"
            ))));
        }
    }

    let movie = MovieRepo::create(&state.pool, &input).await?;
    tracing::info!(movie_id = movie.id, admin = %admin.username, title = %movie.title, "Movie added");
    Ok((StatusCode::CREATED, Json(DataResponse { data: movie })))
}

/// PUT /api/v1/movies/{id} (admin)
pub async fn update(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMovie>,
) -> AppResult<Json<DataResponse<Movie>>> {
    if input.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "Movie title must not be blank".into(),
        )));
    }
    let movie = MovieRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::movie_not_found(id)))?;
    Ok(Json(DataResponse { data: movie }))
}

/// DELETE /api/v1/movies/{id} (admin)
///
/// Votes and the appeal snapshot for the movie are removed with it.
pub async fn delete(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if MovieRepo::delete(&state.pool, id).await? {
        tracing::info!(movie_id = id, admin = %admin.username, "Movie deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::movie_not_found(id)))
    }
}
