//! Movie entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vibevote_core::types::{DbId, Timestamp};

/// A row from the `movies` table.
///
/// Everything past `year` is catalog metadata the scoring never reads.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub tmdb_id: Option<i32>,
    pub title: String,
    pub year: Option<i32>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<i32>,
    pub original_language: Option<String>,
    pub original_title: Option<String>,
    pub popularity: Option<f64>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a movie, either by hand or from a catalog import.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMovie {
    pub tmdb_id: Option<i32>,
    pub title: String,
    pub year: Option<i32>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<i32>,
    pub original_language: Option<String>,
    pub original_title: Option<String>,
    pub popularity: Option<f64>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i32>,
}

/// DTO for a metadata refresh. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMovie {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<i32>,
    pub original_language: Option<String>,
    pub original_title: Option<String>,
    pub popularity: Option<f64>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i32>,
}

/// Movie id, title, year and vote count, as fed to the duplicate planner.
#[derive(Debug, Clone, FromRow)]
pub struct MovieVoteCount {
    pub id: DbId,
    pub title: String,
    pub year: Option<i32>,
    pub vote_count: i64,
}

impl From<MovieVoteCount> for vibevote_core::duplicate_movies::DuplicateCandidate {
    fn from(row: MovieVoteCount) -> Self {
        Self {
            movie_id: row.id,
            title: row.title,
            year: row.year,
            vote_count: row.vote_count,
        }
    }
}
