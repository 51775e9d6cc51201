//! Manage Incidents Use Case
//!
//! Reads for any authenticated caller; update and delete are admin-only
//! (gated in the presentation layer).

use std::sync::Arc;

use kernel::id::IncidentId;

use crate::domain::entities::{Incident, IncidentDetails};
use crate::domain::repository::IncidentRepository;
use crate::domain::services::required_text;
use crate::domain::value_objects::IncidentStatus;
use crate::error::{ReportError, ReportResult};

/// Full replacement of the editable incident fields
///
/// Fields the client left out arrive as empty strings and fail
/// validation.
pub struct UpdateIncidentInput {
    pub description: String,
    pub status: String,
}

/// Manage incidents use case
pub struct ManageIncidentsUseCase<I>
where
    I: IncidentRepository,
{
    incident_repo: Arc<I>,
}

impl<I> ManageIncidentsUseCase<I>
where
    I: IncidentRepository,
{
    pub fn new(incident_repo: Arc<I>) -> Self {
        Self { incident_repo }
    }

    pub async fn list(&self) -> ReportResult<Vec<IncidentDetails>> {
        self.incident_repo.list_incident_details().await
    }

    pub async fn get(&self, incident_id: &IncidentId) -> ReportResult<IncidentDetails> {
        self.incident_repo
            .find_incident_details(incident_id)
            .await?
            .ok_or(ReportError::IncidentNotFound)
    }

    pub async fn update(
        &self,
        incident_id: &IncidentId,
        input: UpdateIncidentInput,
    ) -> ReportResult<Incident> {
        let mut incident = self.find(incident_id).await?;

        let description = required_text("description", &input.description)?;
        let status = IncidentStatus::parse(&input.status)?;

        incident.revise(description, status);
        self.incident_repo.update_incident(&incident).await?;

        tracing::info!(
            incident_id = %incident.incident_id,
            status = %incident.status,
            "Incident updated"
        );

        Ok(incident)
    }

    /// Soft delete; tasks referencing the incident are left as they are
    pub async fn delete(&self, incident_id: &IncidentId) -> ReportResult<()> {
        let mut incident = self.find(incident_id).await?;
        incident.soft_delete();
        self.incident_repo.update_incident(&incident).await?;

        tracing::info!(incident_id = %incident.incident_id, "Incident deleted");

        Ok(())
    }

    async fn find(&self, incident_id: &IncidentId) -> ReportResult<Incident> {
        self.incident_repo
            .find_incident(incident_id)
            .await?
            .ok_or(ReportError::IncidentNotFound)
    }
}
