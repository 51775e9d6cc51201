//! API DTOs (Data Transfer Objects)

use auth::UserRole;
use chrono::{DateTime, Utc};
use kernel::id::{IncidentId, TaskId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Incident, IncidentDetails, Task, TaskDetails, UserSummary};
use crate::domain::value_objects::{IncidentStatus, TaskStatus};

// ============================================================================
// Related users
// ============================================================================

/// Reporter or assignee as embedded in incident and task bodies
#[derive(Debug, Clone, Serialize)]
pub struct UserRef {
    pub id: UserId,
    pub username: String,
    pub role: UserRole,
}

impl From<UserSummary> for UserRef {
    fn from(user: UserSummary) -> Self {
        Self {
            id: user.user_id,
            username: user.user_name,
            role: user.user_role,
        }
    }
}

// ============================================================================
// Incidents
// ============================================================================

/// Incident body; `reporter` is null unless it was loaded
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentResponse {
    pub id: IncidentId,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: String,
    pub reporter_id: UserId,
    pub reporter: Option<UserRef>,
    pub status: IncidentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Present only on a stale reference from a task
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Incident> for IncidentResponse {
    fn from(incident: Incident) -> Self {
        Self {
            id: incident.incident_id,
            description: incident.description,
            latitude: incident.latitude,
            longitude: incident.longitude,
            image_url: incident.image_url,
            reporter_id: incident.reporter_id,
            reporter: None,
            status: incident.status,
            created_at: incident.created_at,
            updated_at: incident.updated_at,
            deleted_at: incident.deleted_at,
        }
    }
}

impl From<IncidentDetails> for IncidentResponse {
    fn from(details: IncidentDetails) -> Self {
        Self {
            reporter: Some(details.reporter.into()),
            ..Self::from(details.incident)
        }
    }
}

/// Admin incident update; absent fields count as empty
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateIncidentRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
}

// ============================================================================
// Tasks
// ============================================================================

/// Task body; `assignedTo` and `incident` are null unless loaded
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub assigned_to_id: Option<UserId>,
    pub assigned_to: Option<UserRef>,
    pub incident_id: IncidentId,
    pub incident: Option<IncidentResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.task_id,
            title: task.title,
            description: task.description,
            status: task.status,
            assigned_to_id: task.assigned_to_id,
            assigned_to: None,
            incident_id: task.incident_id,
            incident: None,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

impl From<TaskDetails> for TaskResponse {
    fn from(details: TaskDetails) -> Self {
        Self {
            assigned_to: details.assigned_to.map(UserRef::from),
            incident: Some(details.incident.into()),
            ..Self::from(details.task)
        }
    }
}

/// Admin task creation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub incident_id: IncidentId,
    #[serde(default)]
    pub assigned_to_id: Option<UserId>,
}

/// Admin task update; a full replace, absent `assignedToId` unassigns
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub assigned_to_id: Option<UserId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Coordinates;

    #[test]
    fn test_incident_response_shape() {
        let incident = Incident::new(
            "pothole".into(),
            Coordinates::new(1.0, 2.0).unwrap(),
            "/uploads/a.jpg".into(),
            UserId::new(),
        );
        let json = serde_json::to_value(IncidentResponse::from(incident)).unwrap();

        assert_eq!(json["status"], "reported");
        assert_eq!(json["imageUrl"], "/uploads/a.jpg");
        assert!(json["reporter"].is_null());
        assert!(json.get("deletedAt").is_none());
    }

    #[test]
    fn test_create_task_request_camel_case() {
        let incident_id = IncidentId::new();
        let req: CreateTaskRequest = serde_json::from_value(serde_json::json!({
            "title": "fix",
            "description": "fill it",
            "incidentId": incident_id,
        }))
        .unwrap();
        assert_eq!(req.incident_id, incident_id);
        assert!(req.assigned_to_id.is_none());

        let missing = serde_json::from_value::<CreateTaskRequest>(serde_json::json!({
            "title": "fix",
        }));
        assert!(missing.is_err());
    }
}
