//! Repository for the `votes` table.

use sqlx::PgPool;
use vibevote_core::types::DbId;
use vibevote_core::vibe::ValidatedVote;

use crate::models::vote::{DeletedVoter, UpsertedVote, Vote, VoterSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, movie_id, user_name, device_id, vibe, seen, created_at, updated_at";

/// Provides vote upsert and listing.
pub struct VoteRepo;

impl VoteRepo {
    /// Record a voter's current opinion of a movie.
    ///
    /// One statement keyed on `uq_votes_movie_user_device`: concurrent
    /// submissions for the same key serialize on the constraint and the last
    /// one wins. `created` is derived from `xmax`, which is zero only for a
    /// freshly inserted tuple.
    ///
    /// An unknown `movie_id` fails with a foreign-key violation on
    /// `fk_votes_movie`.
    pub async fn upsert(pool: &PgPool, vote: &ValidatedVote) -> Result<UpsertedVote, sqlx::Error> {
        let query = format!(
            "INSERT INTO votes (movie_id, user_name, device_id, vibe, seen)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT ON CONSTRAINT uq_votes_movie_user_device
             DO UPDATE SET vibe = EXCLUDED.vibe, seen = EXCLUDED.seen, updated_at = NOW()
             RETURNING {COLUMNS}, (xmax = 0) AS created"
        );
        sqlx::query_as::<_, UpsertedVote>(&query)
            .bind(vote.movie_id)
            .bind(&vote.user_name)
            .bind(&vote.device_id)
            .bind(vote.vibe.get())
            .bind(vote.seen)
            .fetch_one(pool)
            .await
    }

    /// Find the vote for one (movie, name, device) key.
    pub async fn find_by_key(
        pool: &PgPool,
        movie_id: DbId,
        user_name: &str,
        device_id: &str,
    ) -> Result<Option<Vote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM votes
             WHERE movie_id = $1 AND user_name = $2 AND device_id = $3"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(movie_id)
            .bind(user_name)
            .bind(device_id)
            .fetch_optional(pool)
            .await
    }

    /// Votes cast by one voter on one device, most recently changed first.
    pub async fn list_for_voter(
        pool: &PgPool,
        user_name: &str,
        device_id: &str,
    ) -> Result<Vec<Vote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM votes
             WHERE user_name = $1 AND device_id = $2
             ORDER BY updated_at DESC, id DESC"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(user_name)
            .bind(device_id)
            .fetch_all(pool)
            .await
    }

    /// Votes for one movie, oldest first.
    pub async fn list_for_movie(pool: &PgPool, movie_id: DbId) -> Result<Vec<Vote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM votes WHERE movie_id = $1 ORDER BY id");
        sqlx::query_as::<_, Vote>(&query)
            .bind(movie_id)
            .fetch_all(pool)
            .await
    }

    /// All votes, newest first, paged.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Vote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM votes ORDER BY updated_at DESC, id DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count all votes.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM votes")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Every distinct voter name, alphabetical.
    pub async fn distinct_voter_names(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT user_name FROM votes ORDER BY user_name")
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// Per-(name, device) statistics, most active voters first.
    pub async fn list_voters(pool: &PgPool) -> Result<Vec<VoterSummary>, sqlx::Error> {
        sqlx::query_as::<_, VoterSummary>(
            "SELECT user_name, device_id,
                    COUNT(*) AS vote_count,
                    COUNT(*) FILTER (WHERE seen) AS seen_count,
                    COUNT(*) FILTER (WHERE NOT seen) AS not_seen_count,
                    AVG(vibe)::DOUBLE PRECISION AS average_vibe,
                    MAX(updated_at) AS last_voted_at
             FROM votes
             GROUP BY user_name, device_id
             ORDER BY vote_count DESC, user_name ASC, device_id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Delete every vote and the appeal snapshot built from them.
    ///
    /// Returns the number of votes removed.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let removed = sqlx::query("DELETE FROM votes").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM appeals").execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(removed.rows_affected())
    }

    /// Delete every vote cast by one (name, device) pair and forget that
    /// name on the device, in one transaction.
    ///
    /// The appeal snapshot is left alone; the next recompute drops the
    /// removed votes.
    pub async fn delete_for_voter(
        pool: &PgPool,
        user_name: &str,
        device_id: &str,
    ) -> Result<DeletedVoter, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let votes = sqlx::query("DELETE FROM votes WHERE user_name = $1 AND device_id = $2")
            .bind(user_name)
            .bind(device_id)
            .execute(&mut *tx)
            .await?;
        let device_names =
            sqlx::query("DELETE FROM device_names WHERE user_name = $1 AND device_id = $2")
                .bind(user_name)
                .bind(device_id)
                .execute(&mut *tx)
                .await?;
        tx.commit().await?;

        Ok(DeletedVoter {
            votes: votes.rows_affected(),
            device_names: device_names.rows_affected(),
        })
    }
}
