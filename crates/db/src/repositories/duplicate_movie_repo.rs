//! Detection and merge of movies that share a normalised title.

use sqlx::PgPool;
use vibevote_core::duplicate_movies::{
    plan_duplicate_groups, CleanupSummary, DuplicateCandidate, DuplicateGroup,
};

use crate::repositories::MovieRepo;

/// Counts from merging one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupMerge {
    pub movies_removed: u64,
    pub votes_moved: u64,
    pub votes_dropped: u64,
}

/// Provides duplicate planning and merging.
pub struct DuplicateMovieRepo;

impl DuplicateMovieRepo {
    /// Current duplicate groups, planned from live vote counts.
    pub async fn find_groups(
        pool: &PgPool,
        match_year: bool,
    ) -> Result<Vec<DuplicateGroup>, sqlx::Error> {
        let candidates: Vec<DuplicateCandidate> = MovieRepo::list_with_vote_counts(pool)
            .await?
            .into_iter()
            .map(DuplicateCandidate::from)
            .collect();
        Ok(plan_duplicate_groups(&candidates, match_year))
    }

    /// Fold every duplicate of a group into its canonical movie.
    ///
    /// Inside one transaction:
    /// 1. drop duplicate votes whose (name, device) already voted on the
    ///    canonical movie, and among duplicates keep only the newest vote per
    ///    (name, device);
    /// 2. re-point the remaining duplicate votes to the canonical id;
    /// 3. delete the duplicate movies (their appeal rows cascade).
    pub async fn merge_group(pool: &PgPool, group: &DuplicateGroup) -> Result<GroupMerge, sqlx::Error> {
        if group.duplicate_ids.is_empty() {
            return Ok(GroupMerge::default());
        }

        let mut tx = pool.begin().await?;

        sqlx::query("SELECT id FROM movies WHERE id = $1 OR id = ANY($2) FOR UPDATE")
            .bind(group.canonical_id)
            .bind(&group.duplicate_ids)
            .execute(&mut *tx)
            .await?;

        let dropped = sqlx::query(
            "DELETE FROM votes d
             USING votes k
             WHERE d.movie_id = ANY($2)
               AND k.id <> d.id
               AND k.user_name = d.user_name
               AND k.device_id = d.device_id
               AND (k.movie_id = $1
                    OR (k.movie_id = ANY($2) AND (k.updated_at, k.id) > (d.updated_at, d.id)))",
        )
        .bind(group.canonical_id)
        .bind(&group.duplicate_ids)
        .execute(&mut *tx)
        .await?;

        let moved = sqlx::query("UPDATE votes SET movie_id = $1 WHERE movie_id = ANY($2)")
            .bind(group.canonical_id)
            .bind(&group.duplicate_ids)
            .execute(&mut *tx)
            .await?;

        let removed = sqlx::query("DELETE FROM movies WHERE id = ANY($1)")
            .bind(&group.duplicate_ids)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(GroupMerge {
            movies_removed: removed.rows_affected(),
            votes_moved: moved.rows_affected(),
            votes_dropped: dropped.rows_affected(),
        })
    }

    /// Plan and merge every duplicate group, one transaction per group.
    ///
    /// A failing group stops the run; groups merged before it stay merged.
    pub async fn cleanup(pool: &PgPool, match_year: bool) -> Result<CleanupSummary, sqlx::Error> {
        let groups = Self::find_groups(pool, match_year).await?;
        let mut summary = CleanupSummary::default();

        for group in &groups {
            let merge = Self::merge_group(pool, group).await?;
            tracing::info!(
                canonical_id = group.canonical_id,
                title = %group.title,
                removed = merge.movies_removed,
                moved = merge.votes_moved,
                dropped = merge.votes_dropped,
                "Merged duplicate movies",
            );
            summary.groups_merged += 1;
            summary.movies_removed += merge.movies_removed;
            summary.votes_moved += merge.votes_moved;
            summary.votes_dropped += merge.votes_dropped;
        }

        Ok(summary)
    }
}
