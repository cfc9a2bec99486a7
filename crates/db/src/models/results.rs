//! Read models for the results page and dashboard.

use serde::Serialize;
use sqlx::FromRow;
use vibevote_core::types::{DbId, Timestamp};

/// One ranked movie with its appeal snapshot and display fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResultsSummaryRow {
    pub movie_id: DbId,
    pub title: String,
    pub year: Option<i32>,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub appeal_score: f64,
    pub total_votes: i64,
    pub unique_voters: i64,
    pub seen_count: i64,
    pub not_seen_count: i64,
    pub visibility_ratio: f64,
    /// `None` until the first recompute after the movie's first vote.
    pub calculated_at: Option<Timestamp>,
}

/// Poll-wide counters for the dashboard.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VotingStats {
    pub total_movies: i64,
    pub total_votes: i64,
    pub unique_voters: i64,
    pub movies_with_votes: i64,
    pub average_appeal_score: f64,
    pub most_voted_movie: String,
    pub most_voted_count: i64,
}
