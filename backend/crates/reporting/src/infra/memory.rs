//! In-Memory Repository
//!
//! Incidents and tasks in `RwLock<HashMap>`s, users read from a shared
//! `MemoryAuthRepository`. Test double for the PostgreSQL repository.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use auth::domain::entity::user::User;
use auth::infra::memory::MemoryAuthRepository;
use kernel::id::{IncidentId, TaskId, UserId};

use crate::domain::entities::{Incident, IncidentDetails, Task, TaskDetails, UserSummary};
use crate::domain::repository::{IncidentRepository, TaskRepository, UserDirectory};
use crate::error::{ReportError, ReportResult};

#[derive(Clone)]
pub struct MemoryReportingRepository {
    users: MemoryAuthRepository,
    incidents: Arc<RwLock<HashMap<IncidentId, Incident>>>,
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

fn poisoned<T>(_: T) -> ReportError {
    ReportError::Internal("reporting store lock poisoned".to_string())
}

fn summary(user: &User) -> UserSummary {
    UserSummary {
        user_id: user.user_id,
        user_name: user.user_name.original().to_string(),
        user_role: user.user_role,
    }
}

impl MemoryReportingRepository {
    /// Share the user table of `users`
    pub fn new(users: MemoryAuthRepository) -> Self {
        Self {
            users,
            incidents: Arc::default(),
            tasks: Arc::default(),
        }
    }

    fn incidents(&self) -> ReportResult<RwLockReadGuard<'_, HashMap<IncidentId, Incident>>> {
        self.incidents.read().map_err(poisoned)
    }

    fn incidents_mut(&self) -> ReportResult<RwLockWriteGuard<'_, HashMap<IncidentId, Incident>>> {
        self.incidents.write().map_err(poisoned)
    }

    fn tasks(&self) -> ReportResult<RwLockReadGuard<'_, HashMap<TaskId, Task>>> {
        self.tasks.read().map_err(poisoned)
    }

    fn tasks_mut(&self) -> ReportResult<RwLockWriteGuard<'_, HashMap<TaskId, Task>>> {
        self.tasks.write().map_err(poisoned)
    }

    /// Resolve a related user, deleted or not
    fn related_user(&self, user_id: &UserId) -> ReportResult<Option<UserSummary>> {
        Ok(self.any_user(user_id)?.as_ref().map(summary))
    }

    fn any_user(&self, user_id: &UserId) -> ReportResult<Option<User>> {
        self.users
            .find_any(user_id)
            .map_err(|e| ReportError::Internal(e.to_string()))
    }

    fn incident_details(&self, incident: Incident) -> ReportResult<IncidentDetails> {
        let reporter = self.related_user(&incident.reporter_id)?.ok_or_else(|| {
            ReportError::Internal(format!("reporter {} missing", incident.reporter_id))
        })?;
        Ok(IncidentDetails { incident, reporter })
    }

    fn task_details(&self, task: Task) -> ReportResult<TaskDetails> {
        let incident = self
            .incidents()?
            .get(&task.incident_id)
            .cloned()
            .ok_or_else(|| {
                ReportError::Internal(format!("incident {} missing", task.incident_id))
            })?;
        let assigned_to = match &task.assigned_to_id {
            Some(user_id) => self.related_user(user_id)?,
            None => None,
        };
        Ok(TaskDetails {
            task,
            assigned_to,
            incident,
        })
    }
}

impl IncidentRepository for MemoryReportingRepository {
    async fn insert_incident(&self, incident: &Incident) -> ReportResult<()> {
        if self.related_user(&incident.reporter_id)?.is_none() {
            return Err(ReportError::validation("Referenced record does not exist"));
        }
        self.incidents_mut()?
            .insert(incident.incident_id, incident.clone());
        Ok(())
    }

    async fn find_incident(&self, incident_id: &IncidentId) -> ReportResult<Option<Incident>> {
        Ok(self
            .incidents()?
            .get(incident_id)
            .filter(|i| !i.is_deleted())
            .cloned())
    }

    async fn find_incident_details(
        &self,
        incident_id: &IncidentId,
    ) -> ReportResult<Option<IncidentDetails>> {
        let incident = self
            .incidents()?
            .get(incident_id)
            .filter(|i| !i.is_deleted())
            .cloned();
        incident.map(|i| self.incident_details(i)).transpose()
    }

    async fn list_incident_details(&self) -> ReportResult<Vec<IncidentDetails>> {
        let mut incidents: Vec<Incident> = self
            .incidents()?
            .values()
            .filter(|i| !i.is_deleted())
            .cloned()
            .collect();
        incidents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        incidents
            .into_iter()
            .map(|i| self.incident_details(i))
            .collect()
    }

    async fn update_incident(&self, incident: &Incident) -> ReportResult<()> {
        let mut incidents = self.incidents_mut()?;
        match incidents.get_mut(&incident.incident_id) {
            Some(slot) => {
                *slot = incident.clone();
                Ok(())
            }
            None => Err(ReportError::IncidentNotFound),
        }
    }
}

impl TaskRepository for MemoryReportingRepository {
    async fn insert_task(&self, task: &Task) -> ReportResult<()> {
        if !self.incidents()?.contains_key(&task.incident_id) {
            return Err(ReportError::validation("Referenced record does not exist"));
        }
        self.tasks_mut()?.insert(task.task_id, task.clone());
        Ok(())
    }

    async fn find_task(&self, task_id: &TaskId) -> ReportResult<Option<Task>> {
        Ok(self
            .tasks()?
            .get(task_id)
            .filter(|t| !t.is_deleted())
            .cloned())
    }

    async fn find_task_details(&self, task_id: &TaskId) -> ReportResult<Option<TaskDetails>> {
        let task = self
            .tasks()?
            .get(task_id)
            .filter(|t| !t.is_deleted())
            .cloned();
        task.map(|t| self.task_details(t)).transpose()
    }

    async fn list_task_details(&self) -> ReportResult<Vec<TaskDetails>> {
        let mut tasks: Vec<Task> = self
            .tasks()?
            .values()
            .filter(|t| !t.is_deleted())
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tasks.into_iter().map(|t| self.task_details(t)).collect()
    }

    async fn update_task(&self, task: &Task) -> ReportResult<()> {
        let mut tasks = self.tasks_mut()?;
        match tasks.get_mut(&task.task_id) {
            Some(slot) => {
                *slot = task.clone();
                Ok(())
            }
            None => Err(ReportError::TaskNotFound),
        }
    }
}

impl UserDirectory for MemoryReportingRepository {
    async fn find_user(&self, user_id: &UserId) -> ReportResult<Option<UserSummary>> {
        Ok(self
            .any_user(user_id)?
            .filter(|u| !u.is_deleted())
            .as_ref()
            .map(summary))
    }
}
