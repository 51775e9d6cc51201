//! PostgreSQL Repository Implementations

use auth::UserRole;
use chrono::{DateTime, Utc};
use kernel::id::{IncidentId, TaskId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Incident, IncidentDetails, Task, TaskDetails, UserSummary};
use crate::domain::repository::{IncidentRepository, TaskRepository, UserDirectory};
use crate::domain::value_objects::{IncidentStatus, TaskStatus};
use crate::error::{ReportError, ReportResult};

const INCIDENT_DETAILS_SELECT: &str = r#"
    SELECT
        i.incident_id,
        i.description,
        i.latitude,
        i.longitude,
        i.image_url,
        i.reporter_id,
        i.status,
        i.created_at,
        i.updated_at,
        i.deleted_at,
        r.user_name AS reporter_name,
        r.user_role AS reporter_role
    FROM incidents i
    JOIN users r ON r.user_id = i.reporter_id
"#;

const TASK_DETAILS_SELECT: &str = r#"
    SELECT
        t.task_id,
        t.title,
        t.description,
        t.status,
        t.assigned_to_id,
        t.incident_id,
        t.created_at,
        t.updated_at,
        t.deleted_at,
        a.user_name AS assignee_name,
        a.user_role AS assignee_role,
        i.description AS incident_description,
        i.latitude AS incident_latitude,
        i.longitude AS incident_longitude,
        i.image_url AS incident_image_url,
        i.reporter_id AS incident_reporter_id,
        i.status AS incident_status,
        i.created_at AS incident_created_at,
        i.updated_at AS incident_updated_at,
        i.deleted_at AS incident_deleted_at
    FROM tasks t
    JOIN incidents i ON i.incident_id = t.incident_id
    LEFT JOIN users a ON a.user_id = t.assigned_to_id
"#;

/// PostgreSQL-backed reporting repository
#[derive(Clone)]
pub struct PgReportingRepository {
    pool: PgPool,
}

impl PgReportingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Foreign key violations (23503) are caller mistakes, not server faults
fn map_write_error(e: sqlx::Error) -> ReportError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some("23503") {
            return ReportError::validation("Referenced record does not exist");
        }
    }
    ReportError::Database(e)
}

// ============================================================================
// Incident Repository Implementation
// ============================================================================

impl IncidentRepository for PgReportingRepository {
    async fn insert_incident(&self, incident: &Incident) -> ReportResult<()> {
        sqlx::query(
            r#"
            INSERT INTO incidents (
                incident_id,
                description,
                latitude,
                longitude,
                image_url,
                reporter_id,
                status,
                created_at,
                updated_at,
                deleted_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(incident.incident_id.as_uuid())
        .bind(&incident.description)
        .bind(incident.latitude)
        .bind(incident.longitude)
        .bind(&incident.image_url)
        .bind(incident.reporter_id.as_uuid())
        .bind(incident.status.code())
        .bind(incident.created_at)
        .bind(incident.updated_at)
        .bind(incident.deleted_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn find_incident(&self, incident_id: &IncidentId) -> ReportResult<Option<Incident>> {
        let row = sqlx::query_as::<_, IncidentRow>(
            r#"
            SELECT
                incident_id,
                description,
                latitude,
                longitude,
                image_url,
                reporter_id,
                status,
                created_at,
                updated_at,
                deleted_at
            FROM incidents
            WHERE incident_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(incident_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(IncidentRow::into_incident).transpose()
    }

    async fn find_incident_details(
        &self,
        incident_id: &IncidentId,
    ) -> ReportResult<Option<IncidentDetails>> {
        let sql = format!(
            "{INCIDENT_DETAILS_SELECT} WHERE i.incident_id = $1 AND i.deleted_at IS NULL"
        );
        let row = sqlx::query_as::<_, IncidentDetailsRow>(&sql)
            .bind(incident_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(IncidentDetailsRow::into_details).transpose()
    }

    async fn list_incident_details(&self) -> ReportResult<Vec<IncidentDetails>> {
        let sql = format!(
            "{INCIDENT_DETAILS_SELECT} WHERE i.deleted_at IS NULL ORDER BY i.created_at DESC"
        );
        let rows = sqlx::query_as::<_, IncidentDetailsRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(IncidentDetailsRow::into_details).collect()
    }

    async fn update_incident(&self, incident: &Incident) -> ReportResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE incidents SET
                description = $2,
                status = $3,
                updated_at = $4,
                deleted_at = $5
            WHERE incident_id = $1
            "#,
        )
        .bind(incident.incident_id.as_uuid())
        .bind(&incident.description)
        .bind(incident.status.code())
        .bind(incident.updated_at)
        .bind(incident.deleted_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ReportError::IncidentNotFound);
        }

        Ok(())
    }
}

// ============================================================================
// Task Repository Implementation
// ============================================================================

impl TaskRepository for PgReportingRepository {
    async fn insert_task(&self, task: &Task) -> ReportResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tasks (
                task_id,
                title,
                description,
                status,
                assigned_to_id,
                incident_id,
                created_at,
                updated_at,
                deleted_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(task.task_id.as_uuid())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.code())
        .bind(task.assigned_to_id.map(UserId::into_uuid))
        .bind(task.incident_id.as_uuid())
        .bind(task.created_at)
        .bind(task.updated_at)
        .bind(task.deleted_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn find_task(&self, task_id: &TaskId) -> ReportResult<Option<Task>> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT
                task_id,
                title,
                description,
                status,
                assigned_to_id,
                incident_id,
                created_at,
                updated_at,
                deleted_at
            FROM tasks
            WHERE task_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(task_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TaskRow::into_task).transpose()
    }

    async fn find_task_details(&self, task_id: &TaskId) -> ReportResult<Option<TaskDetails>> {
        let sql = format!("{TASK_DETAILS_SELECT} WHERE t.task_id = $1 AND t.deleted_at IS NULL");
        let row = sqlx::query_as::<_, TaskDetailsRow>(&sql)
            .bind(task_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(TaskDetailsRow::into_details).transpose()
    }

    async fn list_task_details(&self) -> ReportResult<Vec<TaskDetails>> {
        let sql =
            format!("{TASK_DETAILS_SELECT} WHERE t.deleted_at IS NULL ORDER BY t.created_at DESC");
        let rows = sqlx::query_as::<_, TaskDetailsRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(TaskDetailsRow::into_details).collect()
    }

    async fn update_task(&self, task: &Task) -> ReportResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE tasks SET
                title = $2,
                description = $3,
                status = $4,
                assigned_to_id = $5,
                updated_at = $6,
                deleted_at = $7
            WHERE task_id = $1
            "#,
        )
        .bind(task.task_id.as_uuid())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.code())
        .bind(task.assigned_to_id.map(UserId::into_uuid))
        .bind(task.updated_at)
        .bind(task.deleted_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(ReportError::TaskNotFound);
        }

        Ok(())
    }
}

// ============================================================================
// User Directory Implementation
// ============================================================================

impl UserDirectory for PgReportingRepository {
    async fn find_user(&self, user_id: &UserId) -> ReportResult<Option<UserSummary>> {
        let row = sqlx::query_as::<_, (Uuid, String, String)>(
            r#"
            SELECT user_id, user_name, user_role
            FROM users
            WHERE user_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|(id, name, role)| user_summary(id, name, &role))
            .transpose()
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

fn user_summary(user_id: Uuid, user_name: String, role: &str) -> ReportResult<UserSummary> {
    let user_role = UserRole::from_code(role)
        .ok_or_else(|| ReportError::Internal(format!("Invalid user_role: {role}")))?;
    Ok(UserSummary {
        user_id: UserId::from_uuid(user_id),
        user_name,
        user_role,
    })
}

fn incident_status(code: &str) -> ReportResult<IncidentStatus> {
    IncidentStatus::from_code(code)
        .ok_or_else(|| ReportError::Internal(format!("Invalid incident status: {code}")))
}

fn task_status(code: &str) -> ReportResult<TaskStatus> {
    TaskStatus::from_code(code)
        .ok_or_else(|| ReportError::Internal(format!("Invalid task status: {code}")))
}

#[derive(sqlx::FromRow)]
struct IncidentRow {
    incident_id: Uuid,
    description: String,
    latitude: f64,
    longitude: f64,
    image_url: String,
    reporter_id: Uuid,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl IncidentRow {
    fn into_incident(self) -> ReportResult<Incident> {
        Ok(Incident {
            incident_id: IncidentId::from_uuid(self.incident_id),
            description: self.description,
            latitude: self.latitude,
            longitude: self.longitude,
            image_url: self.image_url,
            reporter_id: UserId::from_uuid(self.reporter_id),
            status: incident_status(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct IncidentDetailsRow {
    #[sqlx(flatten)]
    incident: IncidentRow,
    reporter_name: String,
    reporter_role: String,
}

impl IncidentDetailsRow {
    fn into_details(self) -> ReportResult<IncidentDetails> {
        let reporter = user_summary(
            self.incident.reporter_id,
            self.reporter_name,
            &self.reporter_role,
        )?;
        Ok(IncidentDetails {
            incident: self.incident.into_incident()?,
            reporter,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    task_id: Uuid,
    title: String,
    description: String,
    status: String,
    assigned_to_id: Option<Uuid>,
    incident_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TaskRow {
    fn into_task(self) -> ReportResult<Task> {
        Ok(Task {
            task_id: TaskId::from_uuid(self.task_id),
            title: self.title,
            description: self.description,
            status: task_status(&self.status)?,
            assigned_to_id: self.assigned_to_id.map(UserId::from_uuid),
            incident_id: IncidentId::from_uuid(self.incident_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TaskDetailsRow {
    #[sqlx(flatten)]
    task: TaskRow,
    assignee_name: Option<String>,
    assignee_role: Option<String>,
    incident_description: String,
    incident_latitude: f64,
    incident_longitude: f64,
    incident_image_url: String,
    incident_reporter_id: Uuid,
    incident_status: String,
    incident_created_at: DateTime<Utc>,
    incident_updated_at: DateTime<Utc>,
    incident_deleted_at: Option<DateTime<Utc>>,
}

impl TaskDetailsRow {
    fn into_details(self) -> ReportResult<TaskDetails> {
        let assigned_to = match (self.task.assigned_to_id, self.assignee_name, self.assignee_role)
        {
            (Some(id), Some(name), Some(role)) => Some(user_summary(id, name, &role)?),
            _ => None,
        };

        let incident = IncidentRow {
            incident_id: self.task.incident_id,
            description: self.incident_description,
            latitude: self.incident_latitude,
            longitude: self.incident_longitude,
            image_url: self.incident_image_url,
            reporter_id: self.incident_reporter_id,
            status: self.incident_status,
            created_at: self.incident_created_at,
            updated_at: self.incident_updated_at,
            deleted_at: self.incident_deleted_at,
        }
        .into_incident()?;

        Ok(TaskDetails {
            task: self.task.into_task()?,
            assigned_to,
            incident,
        })
    }
}
