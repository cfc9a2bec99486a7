//! Voter identity extractors.
//!
//! The client keeps its own device id and chosen display name and sends
//! both on every request. A voter is the (name, device) pair; nothing here
//! touches the database.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use vibevote_core::error::CoreError;
use vibevote_core::vibe::validate_voter_name;

use crate::error::AppError;

/// Header carrying the client-generated device id.
pub const DEVICE_ID_HEADER: &str = "x-device-id";
/// Header carrying the voter's chosen display name.
pub const VOTER_NAME_HEADER: &str = "x-voter-name";

/// Longest device id accepted, in bytes.
const MAX_DEVICE_ID_LEN: usize = 128;

/// Header value as UTF-8. Names like "Zoë" arrive as raw UTF-8 bytes,
/// which `HeaderValue::to_str` would reject.
fn header_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
}

fn parse_device_id(parts: &Parts) -> Result<String, AppError> {
    let raw = header_value(parts, DEVICE_ID_HEADER).unwrap_or_default().trim();
    if raw.is_empty() {
        return Err(CoreError::Validation("Device id is required".into()).into());
    }
    if raw.len() > MAX_DEVICE_ID_LEN {
        return Err(CoreError::Validation(format!(
            "Device id must be at most {MAX_DEVICE_ID_LEN} bytes"
        ))
        .into());
    }
    Ok(raw.to_string())
}

/// The calling device, from `X-Device-Id`.
#[derive(Debug, Clone)]
pub struct DeviceId(pub String);

impl<S: Send + Sync> FromRequestParts<S> for DeviceId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parse_device_id(parts).map(DeviceId)
    }
}

/// The calling voter, from `X-Device-Id` and `X-Voter-Name`.
///
/// The name is trimmed, so `"Sam "` and `"Sam"` are the same voter.
#[derive(Debug, Clone)]
pub struct VoterIdentity {
    pub user_name: String,
    pub device_id: String,
}

impl<S: Send + Sync> FromRequestParts<S> for VoterIdentity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let device_id = parse_device_id(parts)?;
        let user_name =
            validate_voter_name(header_value(parts, VOTER_NAME_HEADER).unwrap_or_default())?;
        Ok(VoterIdentity {
            user_name,
            device_id,
        })
    }
}

/// The voter name header, if the client sent a usable one.
#[derive(Debug, Clone)]
pub struct OptionalVoterName(pub Option<String>);

impl<S: Send + Sync> FromRequestParts<S> for OptionalVoterName {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let name = header_value(parts, VOTER_NAME_HEADER)
            .and_then(|raw| validate_voter_name(raw).ok());
        Ok(OptionalVoterName(name))
    }
}
