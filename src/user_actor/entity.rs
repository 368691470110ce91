use crate::actor_framework::Entity;
use crate::domain::{RecordId, User, UserCreate, UserPatch};

impl Entity for User {
    type Id = RecordId;
    type CreatePayload = UserCreate;
    type Patch = UserPatch;

    /// Updates the user's profile information.
    ///
    /// # Fields Updated
    /// - `first_name`, `last_name`: display name
    /// - `email_address`: contact address
    /// - `password`: replaced wholesale
    fn on_update(&mut self, patch: UserPatch) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(email_address) = patch.email_address {
            self.email_address = email_address;
        }
        if let Some(password) = patch.password {
            self.password = Some(password);
        }
    }

    fn hide_field(&mut self, field: &str) {
        if field == "password" {
            self.password = None;
        }
    }
}
