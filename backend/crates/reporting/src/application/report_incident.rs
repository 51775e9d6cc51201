//! Report Incident Use Case
//!
//! Validates a report, stores its image and records the incident. The
//! row is only written after the image is safely on disk.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entities::Incident;
use crate::domain::repository::{IncidentRepository, MediaStore};
use crate::domain::services::{media_extension, required_text};
use crate::domain::value_objects::Coordinates;
use crate::error::{ReportError, ReportResult};

/// Uploaded image
pub struct ImageUpload {
    /// Client-supplied file name, used only for its extension
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Report incident input
pub struct ReportIncidentInput {
    pub reporter_id: UserId,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image: Option<ImageUpload>,
}

/// Report incident use case
pub struct ReportIncidentUseCase<I, M>
where
    I: IncidentRepository,
    M: MediaStore,
{
    incident_repo: Arc<I>,
    media: Arc<M>,
}

impl<I, M> ReportIncidentUseCase<I, M>
where
    I: IncidentRepository,
    M: MediaStore,
{
    pub fn new(incident_repo: Arc<I>, media: Arc<M>) -> Self {
        Self {
            incident_repo,
            media,
        }
    }

    pub async fn execute(&self, input: ReportIncidentInput) -> ReportResult<Incident> {
        let description = required_text("description", &input.description)?;
        let coordinates = Coordinates::new(input.latitude, input.longitude)?;
        let image = input
            .image
            .filter(|image| !image.bytes.is_empty())
            .ok_or_else(|| ReportError::validation("image is required"))?;

        let extension = image.file_name.as_deref().and_then(media_extension);
        let image_url = self.media.store(&image.bytes, extension.as_deref()).await?;

        let incident = Incident::new(description, coordinates, image_url, input.reporter_id);
        self.incident_repo.insert_incident(&incident).await?;

        tracing::info!(
            incident_id = %incident.incident_id,
            reporter_id = %incident.reporter_id,
            image_url = %incident.image_url,
            "Incident reported"
        );

        Ok(incident)
    }
}
