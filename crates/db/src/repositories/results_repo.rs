//! Read-side queries behind the results page and dashboard.

use sqlx::PgPool;

use crate::models::results::{ResultsSummaryRow, VotingStats};

/// Placeholder reported when no movie has any votes.
pub const NO_MOST_VOTED_MOVIE: &str = "None";

/// Provides the ranked summary and poll-wide counters.
pub struct ResultsRepo;

impl ResultsRepo {
    /// Every voted-on movie joined with its appeal snapshot.
    ///
    /// Ordered by score, then total votes, then title. Movies voted on since
    /// the last recompute appear with zeroed figures and no `calculated_at`.
    pub async fn summary(pool: &PgPool) -> Result<Vec<ResultsSummaryRow>, sqlx::Error> {
        sqlx::query_as::<_, ResultsSummaryRow>(
            "SELECT m.id AS movie_id, m.title, m.year, m.poster_path, m.overview,
                    COALESCE(a.appeal_score, 0) AS appeal_score,
                    COALESCE(a.total_votes, 0) AS total_votes,
                    COALESCE(a.unique_voters, 0) AS unique_voters,
                    COALESCE(a.seen_count, 0) AS seen_count,
                    COALESCE(a.total_votes - a.seen_count, 0) AS not_seen_count,
                    COALESCE(a.visibility_ratio, 0) AS visibility_ratio,
                    a.calculated_at
             FROM movies m
             LEFT JOIN appeals a ON a.movie_id = m.id
             WHERE EXISTS (SELECT 1 FROM votes v WHERE v.movie_id = m.id)
             ORDER BY appeal_score DESC, total_votes DESC, m.title ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Poll-wide counters.
    ///
    /// The average score and most-voted movie only decorate the dashboard,
    /// so a failure there is logged and reported as zero / "None" instead
    /// of failing the whole request.
    pub async fn stats(pool: &PgPool) -> Result<VotingStats, sqlx::Error> {
        let (total_movies, total_votes, unique_voters, movies_with_votes): (i64, i64, i64, i64) =
            sqlx::query_as(
                "SELECT (SELECT COUNT(*) FROM movies),
                        (SELECT COUNT(*) FROM votes),
                        (SELECT COUNT(DISTINCT user_name) FROM votes),
                        (SELECT COUNT(DISTINCT movie_id) FROM votes)",
            )
            .fetch_one(pool)
            .await?;

        let average_appeal_score = match Self::average_appeal_score(pool).await {
            Ok(avg) => avg,
            Err(e) => {
                tracing::warn!(error = %e, "Average appeal score unavailable");
                0.0
            }
        };

        let (most_voted_movie, most_voted_count) = match Self::most_voted_movie(pool).await {
            Ok(Some(found)) => found,
            Ok(None) => (NO_MOST_VOTED_MOVIE.to_string(), 0),
            Err(e) => {
                tracing::warn!(error = %e, "Most voted movie unavailable");
                (NO_MOST_VOTED_MOVIE.to_string(), 0)
            }
        };

        Ok(VotingStats {
            total_movies,
            total_votes,
            unique_voters,
            movies_with_votes,
            average_appeal_score,
            most_voted_movie,
            most_voted_count,
        })
    }

    /// Mean score across the snapshot, `0.0` when it is empty.
    pub async fn average_appeal_score(pool: &PgPool) -> Result<f64, sqlx::Error> {
        let (avg,): (Option<f64>,) = sqlx::query_as("SELECT AVG(appeal_score) FROM appeals")
            .fetch_one(pool)
            .await?;
        Ok(avg.unwrap_or(0.0))
    }

    /// Title and vote count of the movie with the most votes.
    ///
    /// Ties go to the alphabetically first title.
    pub async fn most_voted_movie(pool: &PgPool) -> Result<Option<(String, i64)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT m.title, COUNT(v.id) AS vote_count
             FROM movies m
             JOIN votes v ON v.movie_id = m.id
             GROUP BY m.id, m.title
             ORDER BY vote_count DESC, m.title ASC
             LIMIT 1",
        )
        .fetch_optional(pool)
        .await
    }
}
