use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{RecordId, User, UserCreate};
use crate::schema::Projection;
use crate::user_actor::UserError;

/// Client for interacting with the `Users` store.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

/// Handle registered under the `Users` model name.
pub type Users = UserClient;

impl_basic_client!(UserClient, User, UserError, user, users);

impl UserClient {
    // Custom create so the password never reaches a span field

    #[instrument(
        skip(self, user),
        fields(user_name = %user.first_name, user_email = %user.email_address)
    )]
    pub async fn create_user(&self, user: UserCreate) -> Result<RecordId, UserError> {
        debug!("Sending request");
        self.inner.create(user).await.map_err(UserError::from)
    }

    /// Reads a user including the normally hidden `password` field.
    #[instrument(skip(self))]
    pub async fn get_user_with_password(&self, id: RecordId) -> Result<Option<User>, UserError> {
        debug!("Sending request");
        self.inner
            .get_with(id, Projection::including("password"))
            .await
            .map_err(UserError::from)
    }
}
