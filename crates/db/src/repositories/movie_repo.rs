//! Repository for the `movies` table.

use sqlx::PgPool;
use vibevote_core::types::DbId;

use crate::models::movie::{CreateMovie, Movie, MovieVoteCount, UpdateMovie};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tmdb_id, title, year, overview, poster_path, backdrop_path, \
                       release_date, runtime, original_language, original_title, \
                       popularity, vote_average, vote_count, created_at, updated_at";

/// Provides CRUD operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie, returning the created row.
    ///
    /// A repeated `tmdb_id` fails with a unique violation on
    /// `uq_movies_tmdb_id`.
    pub async fn create(pool: &PgPool, input: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies
                (tmdb_id, title, year, overview, poster_path, backdrop_path, release_date,
                 runtime, original_language, original_title, popularity, vote_average, vote_count)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(input.tmdb_id)
            .bind(input.title.trim())
            .bind(input.year)
            .bind(&input.overview)
            .bind(&input.poster_path)
            .bind(&input.backdrop_path)
            .bind(&input.release_date)
            .bind(input.runtime)
            .bind(&input.original_language)
            .bind(&input.original_title)
            .bind(input.popularity)
            .bind(input.vote_average)
            .bind(input.vote_count)
            .fetch_one(pool)
            .await
    }

    /// Find a movie by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a movie by its external catalog id.
    pub async fn find_by_tmdb_id(
        pool: &PgPool,
        tmdb_id: i32,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE tmdb_id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(tmdb_id)
            .fetch_optional(pool)
            .await
    }

    /// Check whether a movie row exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM movies WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(exists)
    }

    /// List movies alphabetically by title.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movies ORDER BY title ASC, id ASC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count all movies.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM movies")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Update a movie. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMovie,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                title = COALESCE($2, title),
                year = COALESCE($3, year),
                overview = COALESCE($4, overview),
                poster_path = COALESCE($5, poster_path),
                backdrop_path = COALESCE($6, backdrop_path),
                release_date = COALESCE($7, release_date),
                runtime = COALESCE($8, runtime),
                original_language = COALESCE($9, original_language),
                original_title = COALESCE($10, original_title),
                popularity = COALESCE($11, popularity),
                vote_average = COALESCE($12, vote_average),
                vote_count = COALESCE($13, vote_count)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(input.year)
            .bind(&input.overview)
            .bind(&input.poster_path)
            .bind(&input.backdrop_path)
            .bind(&input.release_date)
            .bind(input.runtime)
            .bind(&input.original_language)
            .bind(&input.original_title)
            .bind(input.popularity)
            .bind(input.vote_average)
            .bind(input.vote_count)
            .fetch_optional(pool)
            .await
    }

    /// Delete a movie. Votes and the appeal snapshot go with it.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Every movie with its current vote count, for duplicate planning.
    pub async fn list_with_vote_counts(pool: &PgPool) -> Result<Vec<MovieVoteCount>, sqlx::Error> {
        sqlx::query_as::<_, MovieVoteCount>(
            "SELECT m.id, m.title, m.year, COUNT(v.id) AS vote_count
             FROM movies m
             LEFT JOIN votes v ON v.movie_id = m.id
             GROUP BY m.id
             ORDER BY m.id",
        )
        .fetch_all(pool)
        .await
    }
}
