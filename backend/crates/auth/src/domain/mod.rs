//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the role guard.

pub mod access;
pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use access::{Principal, authorize};
pub use entity::user::User;
pub use repository::UserRepository;
