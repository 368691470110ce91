//! Typed handles over the per-model stores.

#[macro_use]
mod macros;

mod course_client;
mod user_client;

pub use course_client::*;
pub use user_client::*;
