//! Startup provisioning of the shared admin account.

use vibevote_core::error::CoreError;
use vibevote_db::models::admin_user::CreateAdminUser;
use vibevote_db::repositories::AdminUserRepo;
use vibevote_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::config::AdminBootstrapConfig;
use crate::error::{AppError, AppResult};

/// Create the admin account from configuration if it does not exist yet.
///
/// Returns `true` when an account was created. An existing account is left
/// untouched, so changing `ADMIN_PASSWORD` later has no effect.
pub async fn ensure_admin_user(pool: &DbPool, config: &AdminBootstrapConfig) -> AppResult<bool> {
    let Some(password) = config.password.as_deref() else {
        tracing::info!(username = %config.username, "ADMIN_PASSWORD not set, skipping admin bootstrap");
        return Ok(false);
    };

    if AdminUserRepo::find_by_username(pool, &config.username)
        .await?
        .is_some()
    {
        tracing::debug!(username = %config.username, "Admin account already exists");
        return Ok(false);
    }

    validate_password_strength(password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let admin = AdminUserRepo::create(
        pool,
        &CreateAdminUser {
            username: config.username.clone(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(admin_id = admin.id, username = %admin.username, "Admin account created");
    Ok(true)
}
