//! Course records: store hooks and the errors surfaced by the `Courses` handle.

pub mod entity;
pub mod error;

pub use error::*;
