//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::multipart::{Multipart, MultipartRejection};
use std::sync::Arc;

use auth::presentation::dto::MessageResponse;
use auth::{Admin, JsonBody, PathParam, Principal};
use kernel::id::{IncidentId, TaskId};

use crate::application::{
    CreateTaskInput, ManageIncidentsUseCase, ManageTasksUseCase, ReportIncidentUseCase,
    UpdateIncidentInput, UpdateTaskInput,
};
use crate::domain::repository::{IncidentRepository, MediaStore, TaskRepository, UserDirectory};
use crate::error::ReportResult;
use crate::presentation::dto::{
    CreateTaskRequest, IncidentResponse, TaskResponse, UpdateIncidentRequest, UpdateTaskRequest,
};
use crate::presentation::form::IncidentForm;

/// Shared state for reporting handlers
pub struct ReportingAppState<R, M>
where
    R: IncidentRepository + TaskRepository + UserDirectory + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub media: Arc<M>,
}

// Manual impl: only the `Arc`s are cloned.
impl<R, M> Clone for ReportingAppState<R, M>
where
    R: IncidentRepository + TaskRepository + UserDirectory + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            media: self.media.clone(),
        }
    }
}

impl<R, M> ReportingAppState<R, M>
where
    R: IncidentRepository + TaskRepository + UserDirectory + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
{
    fn incidents(&self) -> ManageIncidentsUseCase<R> {
        ManageIncidentsUseCase::new(self.repo.clone())
    }

    fn tasks(&self) -> ManageTasksUseCase<R, R, R> {
        ManageTasksUseCase::new(self.repo.clone(), self.repo.clone(), self.repo.clone())
    }
}

// ============================================================================
// Incidents
// ============================================================================

/// POST /api/incidents (multipart)
pub async fn create_incident<R, M>(
    State(state): State<ReportingAppState<R, M>>,
    principal: Principal,
    multipart: Result<Multipart, MultipartRejection>,
) -> ReportResult<Json<IncidentResponse>>
where
    R: IncidentRepository + TaskRepository + UserDirectory + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
{
    let mut multipart = multipart?;
    let input = IncidentForm::read(&mut multipart)
        .await?
        .into_input(principal.user_id)?;

    let incident = ReportIncidentUseCase::new(state.repo.clone(), state.media.clone())
        .execute(input)
        .await?;

    Ok(Json(incident.into()))
}

/// GET /api/incidents
pub async fn list_incidents<R, M>(
    State(state): State<ReportingAppState<R, M>>,
    _principal: Principal,
) -> ReportResult<Json<Vec<IncidentResponse>>>
where
    R: IncidentRepository + TaskRepository + UserDirectory + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
{
    let incidents = state.incidents().list().await?;
    Ok(Json(incidents.into_iter().map(Into::into).collect()))
}

/// GET /api/incidents/{id}
pub async fn get_incident<R, M>(
    State(state): State<ReportingAppState<R, M>>,
    _principal: Principal,
    PathParam(incident_id): PathParam<IncidentId>,
) -> ReportResult<Json<IncidentResponse>>
where
    R: IncidentRepository + TaskRepository + UserDirectory + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
{
    let incident = state.incidents().get(&incident_id).await?;
    Ok(Json(incident.into()))
}

/// PUT /api/incidents/{id}
pub async fn update_incident<R, M>(
    State(state): State<ReportingAppState<R, M>>,
    Admin(_): Admin,
    PathParam(incident_id): PathParam<IncidentId>,
    JsonBody(req): JsonBody<UpdateIncidentRequest>,
) -> ReportResult<Json<IncidentResponse>>
where
    R: IncidentRepository + TaskRepository + UserDirectory + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
{
    let incident = state
        .incidents()
        .update(
            &incident_id,
            UpdateIncidentInput {
                description: req.description,
                status: req.status,
            },
        )
        .await?;

    Ok(Json(incident.into()))
}

/// DELETE /api/incidents/{id}
pub async fn delete_incident<R, M>(
    State(state): State<ReportingAppState<R, M>>,
    Admin(_): Admin,
    PathParam(incident_id): PathParam<IncidentId>,
) -> ReportResult<Json<MessageResponse>>
where
    R: IncidentRepository + TaskRepository + UserDirectory + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
{
    state.incidents().delete(&incident_id).await?;
    Ok(Json(MessageResponse::new("Incident deleted successfully")))
}

// ============================================================================
// Tasks
// ============================================================================

/// POST /api/tasks
pub async fn create_task<R, M>(
    State(state): State<ReportingAppState<R, M>>,
    Admin(_): Admin,
    JsonBody(req): JsonBody<CreateTaskRequest>,
) -> ReportResult<Json<TaskResponse>>
where
    R: IncidentRepository + TaskRepository + UserDirectory + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
{
    let task = state
        .tasks()
        .create(CreateTaskInput {
            title: req.title,
            description: req.description,
            incident_id: req.incident_id,
            assigned_to_id: req.assigned_to_id,
        })
        .await?;

    Ok(Json(task.into()))
}

/// GET /api/tasks
pub async fn list_tasks<R, M>(
    State(state): State<ReportingAppState<R, M>>,
    _principal: Principal,
) -> ReportResult<Json<Vec<TaskResponse>>>
where
    R: IncidentRepository + TaskRepository + UserDirectory + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
{
    let tasks = state.tasks().list().await?;
    Ok(Json(tasks.into_iter().map(Into::into).collect()))
}

/// GET /api/tasks/{id}
pub async fn get_task<R, M>(
    State(state): State<ReportingAppState<R, M>>,
    _principal: Principal,
    PathParam(task_id): PathParam<TaskId>,
) -> ReportResult<Json<TaskResponse>>
where
    R: IncidentRepository + TaskRepository + UserDirectory + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
{
    let task = state.tasks().get(&task_id).await?;
    Ok(Json(task.into()))
}

/// PUT /api/tasks/{id}
pub async fn update_task<R, M>(
    State(state): State<ReportingAppState<R, M>>,
    Admin(_): Admin,
    PathParam(task_id): PathParam<TaskId>,
    JsonBody(req): JsonBody<UpdateTaskRequest>,
) -> ReportResult<Json<TaskResponse>>
where
    R: IncidentRepository + TaskRepository + UserDirectory + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
{
    let task = state
        .tasks()
        .update(
            &task_id,
            UpdateTaskInput {
                title: req.title,
                description: req.description,
                status: req.status,
                assigned_to_id: req.assigned_to_id,
            },
        )
        .await?;

    Ok(Json(task.into()))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task<R, M>(
    State(state): State<ReportingAppState<R, M>>,
    Admin(_): Admin,
    PathParam(task_id): PathParam<TaskId>,
) -> ReportResult<Json<MessageResponse>>
where
    R: IncidentRepository + TaskRepository + UserDirectory + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
{
    state.tasks().delete(&task_id).await?;
    Ok(Json(MessageResponse::new("Task deleted successfully")))
}
