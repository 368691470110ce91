//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_get`] to assert behavior.

use tokio::sync::{mpsc, oneshot};

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use crate::schema::{Document, Projection};

/// Creates a mock client and a receiver for asserting requests.
///
/// Requests land on a channel the test controls instead of a running store, so
/// the test decides what each request answers (success, validation failure,
/// a dropped reply).
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Document, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { document, respond_to }) => Some((document, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Projection, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, projection, respond_to }) => {
            Some((id, projection, respond_to))
        }
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<(), FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{CourseClient, UserClient};
    use crate::course_actor::CourseError;
    use crate::domain::{Course, CourseCreate, RecordId, User, UserCreate};
    use crate::schema::validate_document;
    use crate::user_actor::UserError;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_user_sends_declared_field_names() {
        let (inner, mut receiver) = create_mock_client::<User>(10);
        let client = UserClient::new(inner);

        let create_task = tokio::spawn(async move {
            client
                .create_user(UserCreate::new("Ada", "Lovelace", "ada@example.com", "secret"))
                .await
        });

        let (document, responder) =
            expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(document.get("firstName"), Some(&json!("Ada")));
        assert_eq!(document.get("emailAddress"), Some(&json!("ada@example.com")));
        assert_eq!(document.get("password"), Some(&json!("secret")));

        let id = RecordId::from_u128(1);
        responder.send(Ok(id)).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(id));
    }

    #[tokio::test]
    async fn test_validation_error_reaches_caller_unchanged() {
        let (inner, mut receiver) = create_mock_client::<Course>(10);
        let client = CourseClient::new(inner);

        let create_task =
            tokio::spawn(async move { client.create_course(CourseCreate::new("", "")).await });

        let (document, responder) =
            expect_create(&mut receiver).await.expect("Expected Create request");
        let validation = validate_document::<Course>(document).unwrap_err();
        responder.send(Err(validation.clone().into())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Err(CourseError::Validation(validation)));
    }

    #[tokio::test]
    async fn test_password_lookup_asks_for_hidden_field() {
        let (inner, mut receiver) = create_mock_client::<User>(10);
        let client = UserClient::new(inner);
        let id = RecordId::from_u128(2);

        let get_task = tokio::spawn(async move { client.get_user_with_password(id).await });

        let (requested, projection, responder) =
            expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(requested, id);
        assert!(projection.includes("password"));
        responder.send(Ok(None)).unwrap();

        assert_eq!(get_task.await.unwrap(), Ok(None));
    }

    #[tokio::test]
    async fn test_dropped_reply_is_a_communication_error() {
        let (inner, mut receiver) = create_mock_client::<User>(10);
        let client = UserClient::new(inner);
        let id = RecordId::from_u128(3);

        let delete_task = tokio::spawn(async move { client.delete_user(id).await });

        let (requested, responder) =
            expect_delete(&mut receiver).await.expect("Expected Delete request");
        assert_eq!(requested, id);
        drop(responder);

        let result = delete_task.await.unwrap();
        assert!(matches!(result, Err(UserError::ActorCommunicationError(_))));
    }
}
