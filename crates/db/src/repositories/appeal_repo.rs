//! Repository for the `appeals` snapshot table.

use sqlx::{PgExecutor, PgPool};
use vibevote_core::appeal::{appeal_score, AppealConfig};
use vibevote_core::types::DbId;
use vibevote_core::vibe::HIGH_VIBE;

use crate::models::appeal::{Appeal, MovieVoteAggregate};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, movie_id, appeal_score, total_votes, unique_voters, seen_count, \
                       visibility_ratio, calculated_at";

/// Advisory lock key held for the duration of a recompute transaction.
const RECOMPUTE_LOCK_KEY: i64 = 0x5649_4245_4150_5031;

/// Per-movie aggregation over the vote table.
///
/// `top_voter` is one row per movie, so joining it does not fan out the
/// vote rows being counted. `live` key-share locks every movie that is
/// aggregated: a movie deleted mid-recompute is either skipped here or its
/// delete waits for the snapshot insert to commit.
const AGGREGATE_QUERY: &str = "\
    WITH live AS (
        SELECT id FROM movies FOR KEY SHARE
    ), per_voter AS (
        SELECT movie_id, user_name, COUNT(*) AS cast_votes
        FROM votes
        GROUP BY movie_id, user_name
    ), top_voter AS (
        SELECT movie_id, MAX(cast_votes) AS top_votes
        FROM per_voter
        GROUP BY movie_id
    )
    SELECT v.movie_id,
           COUNT(*) AS total_votes,
           COUNT(DISTINCT v.user_name) AS unique_voters,
           COUNT(*) FILTER (WHERE v.seen) AS seen_count,
           COUNT(*) FILTER (WHERE NOT v.seen) AS not_seen_count,
           (AVG(v.vibe) FILTER (WHERE v.seen))::DOUBLE PRECISION AS avg_rating,
           (AVG(v.vibe) FILTER (WHERE NOT v.seen))::DOUBLE PRECISION AS avg_interest,
           COUNT(*) FILTER (WHERE v.seen AND v.vibe >= $1) AS high_rating_count,
           COUNT(*) FILTER (WHERE NOT v.seen AND v.vibe >= $1) AS high_interest_count,
           MAX(t.top_votes)::DOUBLE PRECISION / COUNT(*)::DOUBLE PRECISION AS top_user_concentration
    FROM votes v
    JOIN live m ON m.id = v.movie_id
    JOIN top_voter t ON t.movie_id = v.movie_id
    GROUP BY v.movie_id
    ORDER BY v.movie_id";

/// Provides the appeal recompute and snapshot reads.
pub struct AppealRepo;

impl AppealRepo {
    /// Aggregate vote statistics for every movie with at least one vote.
    pub async fn aggregate_votes<'e, E>(executor: E) -> Result<Vec<MovieVoteAggregate>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, MovieVoteAggregate>(AGGREGATE_QUERY)
            .bind(HIGH_VIBE)
            .fetch_all(executor)
            .await
    }

    /// Replace the whole snapshot with freshly computed scores.
    ///
    /// Runs in one transaction: on any error nothing is written and the
    /// previous snapshot stays visible. Concurrent recomputes queue on an
    /// advisory lock so they never interleave their delete and insert.
    pub async fn recompute(pool: &PgPool, config: &AppealConfig) -> Result<Vec<Appeal>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(RECOMPUTE_LOCK_KEY)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM appeals").execute(&mut *tx).await?;

        let aggregates = Self::aggregate_votes(&mut *tx).await?;

        let insert = format!(
            "INSERT INTO appeals
                (movie_id, appeal_score, total_votes, unique_voters, seen_count, visibility_ratio)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let mut appeals = Vec::with_capacity(aggregates.len());
        for aggregate in &aggregates {
            let stats = aggregate.stats();
            let appeal = sqlx::query_as::<_, Appeal>(&insert)
                .bind(aggregate.movie_id)
                .bind(appeal_score(&stats, config))
                .bind(stats.total_votes)
                .bind(stats.unique_voters)
                .bind(stats.seen_count)
                .bind(stats.visibility_ratio())
                .fetch_one(&mut *tx)
                .await?;
            appeals.push(appeal);
        }

        tx.commit().await?;

        tracing::info!(
            movies = appeals.len(),
            threshold = config.participation_threshold,
            "Appeal snapshot recomputed",
        );
        Ok(appeals)
    }

    /// The whole snapshot, best score first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Appeal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM appeals ORDER BY appeal_score DESC, total_votes DESC, movie_id"
        );
        sqlx::query_as::<_, Appeal>(&query).fetch_all(pool).await
    }

    /// The snapshot row for one movie, if it has been scored.
    pub async fn find_for_movie(
        pool: &PgPool,
        movie_id: DbId,
    ) -> Result<Option<Appeal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appeals WHERE movie_id = $1");
        sqlx::query_as::<_, Appeal>(&query)
            .bind(movie_id)
            .fetch_optional(pool)
            .await
    }
}
