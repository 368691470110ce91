pub mod course;
pub mod record_id;
pub mod user;

pub use course::*;
pub use record_id::*;
pub use user::*;
