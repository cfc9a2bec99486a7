//! Vote entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vibevote_core::error::CoreError;
use vibevote_core::types::{DbId, Timestamp};
use vibevote_core::vibe::Judgment;

/// A row from the `votes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vote {
    pub id: DbId,
    pub movie_id: DbId,
    pub user_name: String,
    pub device_id: String,
    pub vibe: i16,
    pub seen: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Vote {
    /// Interpret the stored vibe according to the `seen` flag.
    pub fn judgment(&self) -> Result<Judgment, CoreError> {
        Judgment::from_parts(self.vibe, self.seen)
    }
}

/// Result of an upsert: the stored row and whether it was newly inserted.
///
/// `created == false` means the voter had already voted on this movie from
/// this device and the row was updated in place.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UpsertedVote {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub vote: Vote,
    pub created: bool,
}

/// Per-voter statistics for the admin voter list.
///
/// A voter is a (name, device) pair.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VoterSummary {
    pub user_name: String,
    pub device_id: String,
    pub vote_count: i64,
    pub seen_count: i64,
    pub not_seen_count: i64,
    pub average_vibe: f64,
    pub last_voted_at: Timestamp,
}

/// Rows removed when an admin deletes one voter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeletedVoter {
    pub votes: u64,
    pub device_names: u64,
}
