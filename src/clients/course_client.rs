use tracing::{debug, instrument};

use crate::actor_framework::{Filter, ResourceClient};
use crate::course_actor::CourseError;
use crate::domain::{Course, CourseCreate, RecordId};

/// Client for interacting with the `Courses` store.
#[derive(Clone)]
pub struct CourseClient {
    inner: ResourceClient<Course>,
}

/// Handle registered under the `Courses` model name.
pub type Courses = CourseClient;

impl_basic_client!(CourseClient, Course, CourseError, course, courses);

impl CourseClient {
    #[instrument(skip(self, course), fields(course_title = %course.title))]
    pub async fn create_course(&self, course: CourseCreate) -> Result<RecordId, CourseError> {
        debug!("Sending request");
        self.inner.create(course).await.map_err(CourseError::from)
    }

    /// Courses whose `user` reference equals `user`.
    ///
    /// Matches on the stored identifier only; the user itself may be long gone.
    #[instrument(skip(self))]
    pub async fn find_by_user(&self, user: RecordId) -> Result<Vec<Course>, CourseError> {
        debug!("Sending request");
        self.find_courses(Filter::new(move |course: &Course| course.user == Some(user)))
            .await
    }
}
