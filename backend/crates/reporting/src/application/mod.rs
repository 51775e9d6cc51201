//! Application Layer
//!
//! Use cases for incidents and tasks.

pub mod config;
pub mod manage_incidents;
pub mod manage_tasks;
pub mod report_incident;

// Re-exports
pub use config::ReportingConfig;
pub use manage_incidents::{ManageIncidentsUseCase, UpdateIncidentInput};
pub use manage_tasks::{CreateTaskInput, ManageTasksUseCase, UpdateTaskInput};
pub use report_incident::{ImageUpload, ReportIncidentInput, ReportIncidentUseCase};
