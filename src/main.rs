use course_registry::{
    setup_tracing, CourseCreate, RegistryConfig, SchemaRegistry, UserCreate,
};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = RegistryConfig::load().map_err(|e| e.to_string())?;
    setup_tracing(&config);

    info!(models = ?SchemaRegistry::model_names(), "Starting course registry");

    let registry = SchemaRegistry::start(&config);

    let span = tracing::info_span!("user_creation");
    let user_id = async {
        info!("Creating demo user");
        registry
            .users
            .create_user(UserCreate::new("Ada", "Lovelace", "ada@example.com", "analytical"))
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(user_id = %user_id, "User created successfully");

    let span = tracing::info_span!("course_creation");
    let course_id = async {
        info!("Creating demo course");
        let course = CourseCreate::new("Build a Difference Engine", "Gears, mostly.")
            .owned_by(user_id)
            .estimated_time("12 hours")
            .materials_needed("Brass, patience");
        registry.courses.create_course(course).await.map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(course_id = %course_id, "Course created successfully");

    // a course without a title is rejected by the store
    match registry
        .courses
        .create_course(CourseCreate::new("", "No title"))
        .await
    {
        Ok(id) => error!(course_id = %id, "Invalid course was accepted"),
        Err(e) => info!(error = %e, "Invalid course rejected"),
    }

    let user = registry
        .users
        .get_user(user_id)
        .await
        .map_err(|e| e.to_string())?;
    if let Some(user) = user {
        info!(
            user_name = %user.first_name,
            password_returned = user.password.is_some(),
            "Default read"
        );
    }

    let courses = registry
        .courses
        .find_by_user(user_id)
        .await
        .map_err(|e| e.to_string())?;
    info!(course_count = courses.len(), "Courses found for user");

    registry.shutdown().await.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}
