//! Appeal snapshot model and the per-movie aggregate row.

use serde::Serialize;
use sqlx::FromRow;
use vibevote_core::appeal::MovieVoteStats;
use vibevote_core::types::{DbId, Timestamp};

/// A row from the `appeals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Appeal {
    pub id: DbId,
    pub movie_id: DbId,
    pub appeal_score: f64,
    pub total_votes: i64,
    pub unique_voters: i64,
    pub seen_count: i64,
    pub visibility_ratio: f64,
    pub calculated_at: Timestamp,
}

/// One movie's grouped vote statistics, straight from SQL.
#[derive(Debug, Clone, FromRow)]
pub struct MovieVoteAggregate {
    pub movie_id: DbId,
    pub total_votes: i64,
    pub unique_voters: i64,
    pub seen_count: i64,
    pub not_seen_count: i64,
    pub avg_rating: Option<f64>,
    pub avg_interest: Option<f64>,
    pub high_rating_count: i64,
    pub high_interest_count: i64,
    pub top_user_concentration: f64,
}

impl MovieVoteAggregate {
    pub fn stats(&self) -> MovieVoteStats {
        MovieVoteStats {
            total_votes: self.total_votes,
            unique_voters: self.unique_voters,
            seen_count: self.seen_count,
            not_seen_count: self.not_seen_count,
            avg_rating: self.avg_rating,
            avg_interest: self.avg_interest,
            high_rating_count: self.high_rating_count,
            high_interest_count: self.high_interest_count,
            top_user_concentration: self.top_user_concentration,
        }
    }
}
