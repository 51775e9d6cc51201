//! Incident Report Form
//!
//! Reads the `multipart/form-data` body of `POST /api/incidents`:
//! `description`, `latitude`, `longitude` and an `image` file part.

use axum::extract::Multipart;
use kernel::id::UserId;

use crate::application::{ImageUpload, ReportIncidentInput};
use crate::error::{ReportError, ReportResult};

/// Raw form fields as received
#[derive(Default)]
pub struct IncidentForm {
    pub description: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub image: Option<ImageUpload>,
}

impl IncidentForm {
    /// Drain the multipart stream; unknown fields are skipped
    pub async fn read(multipart: &mut Multipart) -> ReportResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            match field.name() {
                Some("description") => form.description = Some(field.text().await?),
                Some("latitude") => form.latitude = Some(field.text().await?),
                Some("longitude") => form.longitude = Some(field.text().await?),
                Some("image") => {
                    let file_name = field.file_name().map(str::to_string);
                    let bytes = field.bytes().await?.to_vec();
                    form.image = Some(ImageUpload { file_name, bytes });
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// Bind to use-case input; missing or non-numeric fields are 400s
    pub fn into_input(self, reporter_id: UserId) -> ReportResult<ReportIncidentInput> {
        Ok(ReportIncidentInput {
            reporter_id,
            description: self.description.unwrap_or_default(),
            latitude: parse_number("latitude", self.latitude)?,
            longitude: parse_number("longitude", self.longitude)?,
            image: self.image,
        })
    }
}

fn parse_number(field: &str, value: Option<String>) -> ReportResult<f64> {
    let value = value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ReportError::validation(format!("{field} is required")))?;
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ReportError::validation(format!("{field} must be a number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("latitude", Some(" 1.5 ".into())).unwrap(), 1.5);
        assert_eq!(
            parse_number("latitude", None).unwrap_err().to_string(),
            "latitude is required"
        );
        assert_eq!(
            parse_number("longitude", Some("east".into()))
                .unwrap_err()
                .to_string(),
            "longitude must be a number"
        );
    }

    #[test]
    fn test_into_input_keeps_missing_image() {
        let form = IncidentForm {
            description: Some("pothole".into()),
            latitude: Some("1".into()),
            longitude: Some("2".into()),
            image: None,
        };
        let input = form.into_input(UserId::new()).unwrap();
        assert!(input.image.is_none());
        assert_eq!(input.longitude, 2.0);
    }
}
