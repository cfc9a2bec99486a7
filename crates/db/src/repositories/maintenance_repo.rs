//! Whole-database maintenance operations.

use serde::Serialize;
use sqlx::PgPool;

/// Rows removed by [`MaintenanceRepo::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResetSummary {
    pub votes: u64,
    pub appeals: u64,
    pub device_names: u64,
    pub movies: u64,
}

/// Provides the admin reset.
pub struct MaintenanceRepo;

impl MaintenanceRepo {
    /// Delete all votes, appeals, device names and movies in one
    /// transaction. Admin accounts are kept.
    pub async fn reset(pool: &PgPool) -> Result<ResetSummary, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let votes = sqlx::query("DELETE FROM votes").execute(&mut *tx).await?;
        let appeals = sqlx::query("DELETE FROM appeals").execute(&mut *tx).await?;
        let device_names = sqlx::query("DELETE FROM device_names")
            .execute(&mut *tx)
            .await?;
        let movies = sqlx::query("DELETE FROM movies").execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(ResetSummary {
            votes: votes.rows_affected(),
            appeals: appeals.rows_affected(),
            device_names: device_names.rows_affected(),
            movies: movies.rows_affected(),
        })
    }
}
