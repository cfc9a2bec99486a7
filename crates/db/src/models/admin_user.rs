//! Admin account model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vibevote_core::types::{DbId, Timestamp};

/// Full row from the `admin_users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`AdminUserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct AdminUser {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Safe admin representation (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct AdminUserResponse {
    pub id: DbId,
    pub username: String,
    pub last_login_at: Option<Timestamp>,
}

impl From<&AdminUser> for AdminUserResponse {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            last_login_at: user.last_login_at,
        }
    }
}

/// DTO for creating an admin account. The hash is computed by the caller.
#[derive(Debug)]
pub struct CreateAdminUser {
    pub username: String,
    pub password_hash: String,
}
