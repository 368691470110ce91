use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::schema::ValidationError;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// Passed through untouched from the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("User database error: {0}")]
    DatabaseError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for UserError {
    fn from(error: FrameworkError) -> Self {
        match error {
            FrameworkError::Validation(e) => UserError::Validation(e),
            FrameworkError::NotFound(id) => UserError::NotFound(id),
            FrameworkError::Serialization(msg) => UserError::DatabaseError(msg),
            e @ (FrameworkError::ActorClosed | FrameworkError::ActorDropped) => {
                UserError::ActorCommunicationError(e.to_string())
            }
        }
    }
}
