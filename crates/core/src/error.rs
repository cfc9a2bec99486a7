use crate::types::DbId;

/// Domain-level failure shared by every crate in the workspace.
///
/// Storage failures are not represented here; repositories return
/// `sqlx::Error` and the API layer maps both.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Rejected input. The message is shown to the caller verbatim.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a missing movie, the most common lookup failure.
    pub fn movie_not_found(id: DbId) -> Self {
        Self::NotFound { entity: "Movie", id }
    }
}
