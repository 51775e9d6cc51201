//! Reporting Backend Module
//!
//! Incidents reported by users and the tasks admins create against them.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and media traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL, in-memory and filesystem implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Data Rules
//! - Deletes are soft; reads skip deleted rows
//! - Related rows (reporter, assignee, incident) resolve even when deleted
//! - An incident row is written only after its image is on disk

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ReportingConfig;
pub use error::{ReportError, ReportResult};
pub use infra::{
    media::FsMediaStore, memory::MemoryReportingRepository, postgres::PgReportingRepository,
};
pub use presentation::router::{reporting_router, reporting_router_generic};
