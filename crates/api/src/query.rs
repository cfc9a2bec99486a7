//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the handler via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for the duplicate movie endpoints.
#[derive(Debug, Deserialize)]
pub struct DuplicateParams {
    /// Only group titles whose release years also match.
    #[serde(default)]
    pub match_year: bool,
}

/// Identifies one voter (`?user_name=&device_id=`).
#[derive(Debug, Deserialize)]
pub struct VoterKeyParams {
    pub user_name: String,
    pub device_id: String,
}
