use tracing::{error, info, Instrument};

use super::{RegistryConfig, RegistryError};
use crate::actor_framework::ResourceActor;
use crate::clients::{CourseClient, Courses, UserClient, Users};
use crate::domain::{Course, RecordId, User};
use crate::schema::Model;

/// Process-wide registration of the `Users` and `Courses` models.
///
/// Built once at startup with [`SchemaRegistry::start`]; the handles it exposes
/// are cheap to clone and can be passed to whatever needs persistence.
pub struct SchemaRegistry {
    pub users: Users,
    pub courses: Courses,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl SchemaRegistry {
    /// Registers both models and spawns their stores.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: &RegistryConfig) -> Self {
        Self::start_with_ids(config, RecordId::new)
    }

    /// Like [`SchemaRegistry::start`] with a custom id generator, shared by both
    /// stores.
    pub fn start_with_ids(
        config: &RegistryConfig,
        next_id: impl Fn() -> RecordId + Clone + Send + Sync + 'static,
    ) -> Self {
        let span = tracing::info_span!("schema_registry");
        let _guard = span.enter();
        info!(buffer_size = config.buffer_size, "Registering models");

        let (user_actor, user_resource_client) =
            ResourceActor::<User>::new(config.buffer_size, next_id.clone());
        let users = UserClient::new(user_resource_client);
        let user_handle = tokio::spawn(user_actor.run().in_current_span());
        info!(model = User::NAME, "Model registered");

        let (course_actor, course_resource_client) =
            ResourceActor::<Course>::new(config.buffer_size, next_id);
        let courses = CourseClient::new(course_resource_client);
        let course_handle = tokio::spawn(course_actor.run().in_current_span());
        info!(model = Course::NAME, "Model registered");

        Self {
            users,
            courses,
            handles: vec![user_handle, course_handle],
        }
    }

    /// Logical names the models are registered under.
    pub fn model_names() -> [&'static str; 2] {
        [User::NAME, Course::NAME]
    }

    /// Stops both stores and waits for their tasks to finish.
    ///
    /// Handles cloned out of the registry stop working once this returns.
    pub async fn shutdown(self) -> Result<(), RegistryError> {
        info!("Shutting down registry...");

        // a store that already exited has nothing left to stop
        if let Err(e) = self.users.shutdown().await {
            error!(error = %e, "Users store was already closed");
        }
        if let Err(e) = self.courses.shutdown().await {
            error!(error = %e, "Courses store was already closed");
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(RegistryError::TaskFailed(e.to_string()));
            }
        }

        info!("Registry shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_logical_names() {
        assert_eq!(SchemaRegistry::model_names(), ["Users", "Courses"]);
    }

    #[tokio::test]
    async fn starts_and_stops_cleanly() -> Result<(), Box<dyn std::error::Error>> {
        let registry = SchemaRegistry::start(&RegistryConfig::default());

        assert_eq!(registry.users.count_users().await?, 0);
        assert_eq!(registry.courses.count_courses().await?, 0);

        registry.shutdown().await?;
        Ok(())
    }

    #[tokio::test]
    async fn cloned_handles_do_not_block_shutdown() -> Result<(), Box<dyn std::error::Error>> {
        let registry = SchemaRegistry::start(&RegistryConfig::default());
        let users = registry.users.clone();

        registry.shutdown().await?;
        assert!(users.count_users().await.is_err());
        Ok(())
    }
}
