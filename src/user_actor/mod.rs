//! User records: store hooks and the errors surfaced by the `Users` handle.

pub mod entity;
pub mod error;

pub use error::*;
