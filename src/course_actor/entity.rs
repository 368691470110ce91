use crate::actor_framework::Entity;
use crate::domain::{Course, CourseCreate, CoursePatch, RecordId};

impl Entity for Course {
    type Id = RecordId;
    type CreatePayload = CourseCreate;
    type Patch = CoursePatch;

    /// Updates the course details.
    ///
    /// The `user` reference can be re-pointed or cleared but is never checked
    /// against the user store.
    fn on_update(&mut self, patch: CoursePatch) {
        if let Some(user) = patch.user {
            self.user = user;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(estimated_time) = patch.estimated_time {
            self.estimated_time = estimated_time;
        }
        if let Some(materials_needed) = patch.materials_needed {
            self.materials_needed = materials_needed;
        }
    }
}
