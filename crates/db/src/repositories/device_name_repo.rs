//! Repository for the `device_names` history table.

use sqlx::PgPool;

use crate::models::device_name::DeviceName;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, device_id, user_name, last_seen_at, created_at";

/// Tracks which display names each device has used.
pub struct DeviceNameRepo;

impl DeviceNameRepo {
    /// Remember that `device_id` is using `user_name`, bumping `last_seen_at`
    /// when the pair is already known.
    pub async fn record(
        pool: &PgPool,
        device_id: &str,
        user_name: &str,
    ) -> Result<DeviceName, sqlx::Error> {
        let query = format!(
            "INSERT INTO device_names (device_id, user_name)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_device_names_device_user
             DO UPDATE SET last_seen_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DeviceName>(&query)
            .bind(device_id)
            .bind(user_name)
            .fetch_one(pool)
            .await
    }

    /// Names used on a device, most recently seen first.
    pub async fn list_for_device(
        pool: &PgPool,
        device_id: &str,
    ) -> Result<Vec<DeviceName>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM device_names
             WHERE device_id = $1
             ORDER BY last_seen_at DESC, id DESC"
        );
        sqlx::query_as::<_, DeviceName>(&query)
            .bind(device_id)
            .fetch_all(pool)
            .await
    }

    /// The name a device used most recently.
    pub async fn most_recent(
        pool: &PgPool,
        device_id: &str,
    ) -> Result<Option<DeviceName>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM device_names
             WHERE device_id = $1
             ORDER BY last_seen_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, DeviceName>(&query)
            .bind(device_id)
            .fetch_optional(pool)
            .await
    }

    /// Bump `last_seen_at` for a known pair. Returns `false` if the pair is
    /// not on record.
    pub async fn touch(pool: &PgPool, device_id: &str, user_name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE device_names SET last_seen_at = NOW()
             WHERE device_id = $1 AND user_name = $2",
        )
        .bind(device_id)
        .bind(user_name)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
