//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer.
//!
//! `find_*` and `list_*` only return rows whose own `deleted_at` is null.
//! Relations attached to `*Details` are resolved whether or not they have
//! been deleted.

use kernel::id::{IncidentId, TaskId, UserId};

use crate::domain::entities::{Incident, IncidentDetails, Task, TaskDetails, UserSummary};
use crate::error::ReportResult;

/// Incident repository trait
#[trait_variant::make(IncidentRepository: Send)]
pub trait LocalIncidentRepository {
    async fn insert_incident(&self, incident: &Incident) -> ReportResult<()>;

    async fn find_incident(&self, incident_id: &IncidentId) -> ReportResult<Option<Incident>>;

    async fn find_incident_details(
        &self,
        incident_id: &IncidentId,
    ) -> ReportResult<Option<IncidentDetails>>;

    /// Newest first
    async fn list_incident_details(&self) -> ReportResult<Vec<IncidentDetails>>;

    /// Persist every mutable field, `deleted_at` included
    async fn update_incident(&self, incident: &Incident) -> ReportResult<()>;
}

/// Task repository trait
#[trait_variant::make(TaskRepository: Send)]
pub trait LocalTaskRepository {
    async fn insert_task(&self, task: &Task) -> ReportResult<()>;

    async fn find_task(&self, task_id: &TaskId) -> ReportResult<Option<Task>>;

    async fn find_task_details(&self, task_id: &TaskId) -> ReportResult<Option<TaskDetails>>;

    /// Newest first
    async fn list_task_details(&self) -> ReportResult<Vec<TaskDetails>>;

    /// Persist every mutable field, `deleted_at` included
    async fn update_task(&self, task: &Task) -> ReportResult<()>;
}

/// Read access to accounts owned by the auth module
#[trait_variant::make(UserDirectory: Send)]
pub trait LocalUserDirectory {
    /// Live user by id
    async fn find_user(&self, user_id: &UserId) -> ReportResult<Option<UserSummary>>;
}

/// Media store trait
#[trait_variant::make(MediaStore: Send)]
pub trait LocalMediaStore {
    /// Persist `bytes` under a fresh unique name and return its public URL
    ///
    /// Nothing is visible under the final name until the write completed.
    async fn store(&self, bytes: &[u8], extension: Option<&str>) -> ReportResult<String>;
}
