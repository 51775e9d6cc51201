//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Incident, Task) and their read models
//! - Domain value objects (statuses, Coordinates)
//! - Domain services (input rules)
//! - Repository and media store traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
