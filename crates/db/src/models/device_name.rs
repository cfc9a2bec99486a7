//! Device name history model.

use serde::Serialize;
use sqlx::FromRow;
use vibevote_core::types::{DbId, Timestamp};

/// A row from the `device_names` table: one name a device has used.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeviceName {
    pub id: DbId,
    pub device_id: String,
    pub user_name: String,
    pub last_seen_at: Timestamp,
    pub created_at: Timestamp,
}
