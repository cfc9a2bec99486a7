//! Handlers for the "choose your name" onboarding flow.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use vibevote_core::name_matching::{check_name, NameCheck};
use vibevote_core::vibe::validate_voter_name;
use vibevote_db::repositories::{DeviceNameRepo, VoteRepo};

use crate::error::AppResult;
use crate::middleware::voter::{DeviceId, OptionalVoterName};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /identity/check-name`.
#[derive(Debug, Deserialize)]
pub struct CheckNameRequest {
    pub name: String,
}

/// Request body for `POST /identity/confirm-name`.
#[derive(Debug, Deserialize)]
pub struct ConfirmNameRequest {
    pub name: String,
    /// `false` when the voter dismissed a suggestion and keeps their input.
    pub confirmed: bool,
}

/// Outcome of `POST /identity/confirm-name`.
#[derive(Debug, Serialize)]
pub struct ConfirmNameResponse {
    pub user_name: String,
    pub device_id: String,
    /// Whether the name was stored in the device history.
    pub recorded: bool,
}

/// What the server knows about the calling device.
#[derive(Debug, Serialize)]
pub struct DeviceIdentity {
    pub device_id: String,
    /// Most recently used name, if any.
    pub current_name: Option<String>,
    /// Every name used on this device, most recent first.
    pub device_names: Vec<String>,
}

/// POST /api/v1/identity/check-name
///
/// Compare a candidate name with this device's history and then with every
/// name that has voted. The database-wide lookup is best effort.
pub async fn check(
    State(state): State<AppState>,
    DeviceId(device_id): DeviceId,
    payload: Result<Json<CheckNameRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<NameCheck>>> {
    let Json(input) = payload?;
    let name = validate_voter_name(&input.name)?;

    let device_names: Vec<String> = DeviceNameRepo::list_for_device(&state.pool, &device_id)
        .await?
        .into_iter()
        .map(|d| d.user_name)
        .collect();

    let known_names = match VoteRepo::distinct_voter_names(&state.pool).await {
        Ok(names) => names,
        Err(e) => {
            tracing::warn!(error = %e, "Voter name lookup failed, skipping suggestions");
            Vec::new()
        }
    };

    let outcome = check_name(&name, &device_names, &known_names);
    tracing::debug!(%device_id, %name, ?outcome, "Checked voter name");
    Ok(Json(DataResponse { data: outcome }))
}

/// POST /api/v1/identity/confirm-name
pub async fn confirm(
    State(state): State<AppState>,
    DeviceId(device_id): DeviceId,
    payload: Result<Json<ConfirmNameRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<ConfirmNameResponse>>> {
    let Json(input) = payload?;
    let user_name = validate_voter_name(&input.name)?;

    if input.confirmed {
        DeviceNameRepo::record(&state.pool, &device_id, &user_name).await?;
        tracing::info!(%device_id, %user_name, "Voter name confirmed");
    }

    Ok(Json(DataResponse {
        data: ConfirmNameResponse {
            user_name,
            device_id,
            recorded: input.confirmed,
        },
    }))
}

/// GET /api/v1/identity/me
///
/// When the voter name header is present and already known for this
/// device, its last-seen time is bumped.
pub async fn me(
    State(state): State<AppState>,
    DeviceId(device_id): DeviceId,
    OptionalVoterName(voter_name): OptionalVoterName,
) -> AppResult<Json<DataResponse<DeviceIdentity>>> {
    if let Some(name) = voter_name.as_deref() {
        DeviceNameRepo::touch(&state.pool, &device_id, name).await?;
    }

    let current_name = DeviceNameRepo::most_recent(&state.pool, &device_id)
        .await?
        .map(|d| d.user_name);
    let device_names = DeviceNameRepo::list_for_device(&state.pool, &device_id)
        .await?
        .into_iter()
        .map(|d| d.user_name)
        .collect();

    Ok(Json(DataResponse {
        data: DeviceIdentity {
            device_id,
            current_name,
            device_names,
        },
    }))
}
