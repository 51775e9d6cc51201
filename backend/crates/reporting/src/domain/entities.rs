//! Domain Entities
//!
//! Incidents, tasks and the read models that carry their eager-loaded
//! relations. Deletes only set `deleted_at`.

use auth::UserRole;
use chrono::{DateTime, Utc};
use kernel::id::{IncidentId, TaskId, UserId};

use crate::domain::value_objects::{Coordinates, IncidentStatus, TaskStatus};

/// User as seen from an incident or task
#[derive(Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub user_id: UserId,
    pub user_name: String,
    pub user_role: UserRole,
}

/// Incident entity - a geolocated report with a photo
#[derive(Debug, Clone, PartialEq)]
pub struct Incident {
    pub incident_id: IncidentId,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: String,
    /// Fixed at creation
    pub reporter_id: UserId,
    pub status: IncidentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Incident {
    /// Create a new incident in the `reported` state
    pub fn new(
        description: String,
        coordinates: Coordinates,
        image_url: String,
        reporter_id: UserId,
    ) -> Self {
        let now = Utc::now();
        Self {
            incident_id: IncidentId::new(),
            description,
            latitude: coordinates.latitude(),
            longitude: coordinates.longitude(),
            image_url,
            reporter_id,
            status: IncidentStatus::Reported,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Replace the admin-editable fields
    pub fn revise(&mut self, description: String, status: IncidentStatus) {
        self.description = description;
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn soft_delete(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}

/// Incident with its reporter attached
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentDetails {
    pub incident: Incident,
    pub reporter: UserSummary,
}

/// Task entity - work item created by an admin against an incident
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub task_id: TaskId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub assigned_to_id: Option<UserId>,
    pub incident_id: IncidentId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new task in the `pending` state
    pub fn new(
        title: String,
        description: String,
        incident_id: IncidentId,
        assigned_to_id: Option<UserId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            task_id: TaskId::new(),
            title,
            description,
            status: TaskStatus::Pending,
            assigned_to_id,
            incident_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Full replacement of the editable fields; `None` clears the assignee
    pub fn revise(
        &mut self,
        title: String,
        description: String,
        status: TaskStatus,
        assigned_to_id: Option<UserId>,
    ) {
        self.title = title;
        self.description = description;
        self.status = status;
        self.assigned_to_id = assigned_to_id;
        self.updated_at = Utc::now();
    }

    pub fn soft_delete(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}

/// Task with assignee and incident attached
///
/// `incident` is resolved even when it has been deleted since.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDetails {
    pub task: Task,
    pub assigned_to: Option<UserSummary>,
    pub incident: Incident,
}
