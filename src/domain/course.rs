use serde::{Deserialize, Serialize};

use super::RecordId;
use crate::schema::{FieldKind, FieldSpec, Model};

/// A course offered by a user.
///
/// `user` is an advisory back-reference: nothing checks that the user exists,
/// and deleting the user leaves the course in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<RecordId>,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials_needed: Option<String>,
}

impl Model for Course {
    const NAME: &'static str = "Courses";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("user", FieldKind::ObjectId),
        FieldSpec::required("title", FieldKind::String),
        FieldSpec::required("description", FieldKind::String),
        FieldSpec::optional("estimatedTime", FieldKind::String),
        FieldSpec::optional("materialsNeeded", FieldKind::String),
    ];
}

/// Payload for creating a new course.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<RecordId>,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials_needed: Option<String>,
}

impl CourseCreate {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            user: None,
            title: title.into(),
            description: description.into(),
            estimated_time: None,
            materials_needed: None,
        }
    }

    pub fn owned_by(mut self, user: RecordId) -> Self {
        self.user = Some(user);
        self
    }

    pub fn estimated_time(mut self, estimated_time: impl Into<String>) -> Self {
        self.estimated_time = Some(estimated_time.into());
        self
    }

    pub fn materials_needed(mut self, materials_needed: impl Into<String>) -> Self {
        self.materials_needed = Some(materials_needed.into());
        self
    }
}

/// Payload for updating an existing course.
///
/// Optional fields take `Some(None)` to clear the stored value; `None` leaves
/// it as is.
#[derive(Debug, Clone, Default)]
pub struct CoursePatch {
    pub user: Option<Option<RecordId>>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<Option<String>>,
    pub materials_needed: Option<Option<String>>,
}
