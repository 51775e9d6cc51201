//! Manage Tasks Use Case
//!
//! Task CRUD. The referenced incident and assignee must be live at the
//! time of create or update.

use std::sync::Arc;

use kernel::id::{IncidentId, TaskId, UserId};

use crate::domain::entities::{Task, TaskDetails};
use crate::domain::repository::{IncidentRepository, TaskRepository, UserDirectory};
use crate::domain::services::required_text;
use crate::domain::value_objects::TaskStatus;
use crate::error::{ReportError, ReportResult};

/// Create task input
pub struct CreateTaskInput {
    pub title: String,
    pub description: String,
    pub incident_id: IncidentId,
    pub assigned_to_id: Option<UserId>,
}

/// Full replacement of the editable task fields
pub struct UpdateTaskInput {
    pub title: String,
    pub description: String,
    pub status: String,
    /// `None` clears the assignment
    pub assigned_to_id: Option<UserId>,
}

/// Manage tasks use case
pub struct ManageTasksUseCase<T, I, U>
where
    T: TaskRepository,
    I: IncidentRepository,
    U: UserDirectory,
{
    task_repo: Arc<T>,
    incident_repo: Arc<I>,
    users: Arc<U>,
}

impl<T, I, U> ManageTasksUseCase<T, I, U>
where
    T: TaskRepository,
    I: IncidentRepository,
    U: UserDirectory,
{
    pub fn new(task_repo: Arc<T>, incident_repo: Arc<I>, users: Arc<U>) -> Self {
        Self {
            task_repo,
            incident_repo,
            users,
        }
    }

    pub async fn list(&self) -> ReportResult<Vec<TaskDetails>> {
        self.task_repo.list_task_details().await
    }

    pub async fn get(&self, task_id: &TaskId) -> ReportResult<TaskDetails> {
        self.task_repo
            .find_task_details(task_id)
            .await?
            .ok_or(ReportError::TaskNotFound)
    }

    pub async fn create(&self, input: CreateTaskInput) -> ReportResult<Task> {
        let title = required_text("title", &input.title)?;
        let description = required_text("description", &input.description)?;
        self.ensure_incident(&input.incident_id).await?;
        self.ensure_assignee(input.assigned_to_id.as_ref()).await?;

        let task = Task::new(title, description, input.incident_id, input.assigned_to_id);
        self.task_repo.insert_task(&task).await?;

        tracing::info!(
            task_id = %task.task_id,
            incident_id = %task.incident_id,
            "Task created"
        );

        Ok(task)
    }

    /// Returns the task with its relations reattached
    pub async fn update(
        &self,
        task_id: &TaskId,
        input: UpdateTaskInput,
    ) -> ReportResult<TaskDetails> {
        let mut task = self.find(task_id).await?;

        let title = required_text("title", &input.title)?;
        let description = required_text("description", &input.description)?;
        let status = TaskStatus::parse(&input.status)?;
        self.ensure_assignee(input.assigned_to_id.as_ref()).await?;

        task.revise(title, description, status, input.assigned_to_id);
        self.task_repo.update_task(&task).await?;

        tracing::info!(task_id = %task.task_id, status = %task.status, "Task updated");

        self.get(task_id).await
    }

    /// Soft delete
    pub async fn delete(&self, task_id: &TaskId) -> ReportResult<()> {
        let mut task = self.find(task_id).await?;
        task.soft_delete();
        self.task_repo.update_task(&task).await?;

        tracing::info!(task_id = %task.task_id, "Task deleted");

        Ok(())
    }

    async fn find(&self, task_id: &TaskId) -> ReportResult<Task> {
        self.task_repo
            .find_task(task_id)
            .await?
            .ok_or(ReportError::TaskNotFound)
    }

    async fn ensure_incident(&self, incident_id: &IncidentId) -> ReportResult<()> {
        match self.incident_repo.find_incident(incident_id).await? {
            Some(_) => Ok(()),
            None => Err(ReportError::validation(format!(
                "incident {incident_id} does not exist"
            ))),
        }
    }

    async fn ensure_assignee(&self, user_id: Option<&UserId>) -> ReportResult<()> {
        let Some(user_id) = user_id else {
            return Ok(());
        };
        match self.users.find_user(user_id).await? {
            Some(_) => Ok(()),
            None => Err(ReportError::validation(format!(
                "user {user_id} does not exist"
            ))),
        }
    }
}
