//! Vote value types and submission validation.
//!
//! Storage keeps a single `vibe` integer plus a `seen` flag. The meaning of
//! the integer depends on the flag: a quality rating for movies the voter
//! has seen, an interest level for movies they have not. [`Judgment`] makes
//! that split explicit so nothing downstream has to remember it.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lowest accepted vibe value.
pub const MIN_VIBE: i16 = 1;
/// Highest accepted vibe value.
pub const MAX_VIBE: i16 = 6;

/// Votes at or above this vibe count towards the consensus bonus.
pub const HIGH_VIBE: i16 = 2;

/// A vibe value guaranteed to lie in `MIN_VIBE..=MAX_VIBE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Vibe(i16);

impl Vibe {
    /// Values outside the range, including ones that do not fit an `i16`,
    /// are a validation error.
    pub fn new(value: i64) -> Result<Self, CoreError> {
        match i16::try_from(value) {
            Ok(v) if (MIN_VIBE..=MAX_VIBE).contains(&v) => Ok(Self(v)),
            _ => Err(CoreError::Validation(format!(
                "Vibe must be between {MIN_VIBE} and {MAX_VIBE}, got {value}"
            ))),
        }
    }

    pub fn get(self) -> i16 {
        self.0
    }

    pub fn is_high(self) -> bool {
        self.0 >= HIGH_VIBE
    }
}

impl TryFrom<i16> for Vibe {
    type Error = CoreError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

/// What a single vote says about a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Judgment {
    /// The voter has watched the movie; `rating` is how good it was.
    Seen { rating: i64 },
    /// The voter has not watched it; `level` is how keen they are.
    Interested { level: i64 },
}

impl Judgment {
    /// Build a judgment from the stored column pair.
    pub fn from_parts(vibe: i16, seen: bool) -> Result<Self, CoreError> {
        let vibe = i64::from(Vibe::try_from(vibe)?.get());
        Ok(if seen {
            Self::Seen { rating: vibe }
        } else {
            Self::Interested { level: vibe }
        })
    }

    /// Split into the raw `(vibe, seen)` pair; the vibe is not range-checked.
    pub fn into_parts(self) -> (i64, bool) {
        match self {
            Self::Seen { rating } => (rating, true),
            Self::Interested { level } => (level, false),
        }
    }

    /// Validated vibe regardless of which meaning it carries.
    pub fn vibe(self) -> Result<Vibe, CoreError> {
        Vibe::new(self.into_parts().0)
    }

    pub fn is_seen(self) -> bool {
        matches!(self, Self::Seen { .. })
    }
}

/// A vote about to be written, after identity and range checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedVote {
    pub movie_id: crate::types::DbId,
    pub user_name: String,
    pub device_id: String,
    pub vibe: Vibe,
    pub seen: bool,
}

/// Check a raw submission and normalise the voter name.
///
/// The name is trimmed before storage so `"Sam "` and `"Sam"` share a vote
/// key. The device id is taken as-is but must not be blank.
pub fn validate_vote(
    movie_id: crate::types::DbId,
    user_name: &str,
    device_id: &str,
    judgment: Judgment,
) -> Result<ValidatedVote, CoreError> {
    if movie_id <= 0 {
        return Err(CoreError::Validation(format!("Invalid movie id {movie_id}")));
    }
    let user_name = validate_voter_name(user_name)?;
    if device_id.trim().is_empty() {
        return Err(CoreError::Validation("Device id is required".into()));
    }
    let vibe = judgment.vibe()?;
    Ok(ValidatedVote {
        movie_id,
        user_name,
        device_id: device_id.to_string(),
        vibe,
        seen: judgment.is_seen(),
    })
}

/// Maximum stored length of a voter display name, in characters.
pub const MAX_VOTER_NAME_LEN: usize = 64;

/// Trim a display name and reject empty or oversized input.
pub fn validate_voter_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Voter name is required".into()));
    }
    if trimmed.chars().count() > MAX_VOTER_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Voter name must be at most {MAX_VOTER_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}
