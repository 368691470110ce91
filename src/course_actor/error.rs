use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::schema::ValidationError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CourseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Course not found: {0}")]
    NotFound(String),
    #[error("Course database error: {0}")]
    DatabaseError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for CourseError {
    fn from(error: FrameworkError) -> Self {
        match error {
            FrameworkError::Validation(e) => CourseError::Validation(e),
            FrameworkError::NotFound(id) => CourseError::NotFound(id),
            FrameworkError::Serialization(msg) => CourseError::DatabaseError(msg),
            e @ (FrameworkError::ActorClosed | FrameworkError::ActorDropped) => {
                CourseError::ActorCommunicationError(e.to_string())
            }
        }
    }
}
