//! System orchestration: configuration, startup, shutdown and tracing.

pub mod config;
pub mod error;
pub mod registry;
pub mod tracing;

pub use config::*;
pub use error::*;
pub use registry::*;
pub use self::tracing::*;
