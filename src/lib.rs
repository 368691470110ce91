//! # Course Registry
//!
//! Record shapes for a small course catalogue, `User` and `Course`, registered
//! with an in-process document store.
//!
//! - **Record shapes** - field names, kinds, required-ness and visibility → [`schema`]
//! - **Domain types** - the records and their create/patch payloads → [`domain`]
//! - **Store** - one resource actor per model, validating every write → [`actor_framework`]
//! - **Handles** - typed clients registered as `Users` and `Courses` → [`clients`]
//! - **Registry** - explicit startup and shutdown → [`SchemaRegistry`]
//!
//! ## Example Usage
//!
//! ```no_run
//! use course_registry::{CourseCreate, RegistryConfig, SchemaRegistry, UserCreate};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::start(&RegistryConfig::load()?);
//!
//! let user_id = registry
//!     .users
//!     .create_user(UserCreate::new("Ada", "Lovelace", "ada@example.com", "secret"))
//!     .await?;
//! let _course_id = registry
//!     .courses
//!     .create_course(CourseCreate::new("Engines", "Analytical ones").owned_by(user_id))
//!     .await?;
//!
//! registry.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod course_actor;
pub mod domain;
pub mod schema;
pub mod user_actor;

#[cfg(test)]
mod mock_framework;

pub use actor_framework::{Entity, Filter, FrameworkError};
pub use app_system::{setup_tracing, ConfigError, RegistryConfig, RegistryError, SchemaRegistry};
pub use clients::{CourseClient, Courses, UserClient, Users};
pub use course_actor::CourseError;
pub use domain::{Course, CourseCreate, CoursePatch, RecordId, User, UserCreate, UserPatch};
pub use schema::{FieldError, FieldKind, FieldSpec, Model, Projection, ValidationError};
pub use user_actor::UserError;
