//! Domain Services
//!
//! Input rules shared by the incident, task and media use cases.

use crate::error::{ReportError, ReportResult};

/// Longest file extension kept on a stored upload
pub const MAX_EXTENSION_LEN: usize = 10;

/// Trimmed `value`, or a validation error naming `field` when it is empty
pub fn required_text(field: &str, value: &str) -> ReportResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ReportError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Extension of an uploaded file name, lowercased
///
/// Only 1 to [`MAX_EXTENSION_LEN`] ASCII alphanumerics qualify; anything
/// else is dropped so client input never shapes the stored path.
pub fn media_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    // ".jpg" is a hidden file with no extension
    if stem.is_empty()
        || ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("title", "  fix  ").unwrap(), "fix");
        let err = required_text("title", "   ").unwrap_err();
        assert_eq!(err.to_string(), "title is required");
    }

    #[test]
    fn test_media_extension() {
        assert_eq!(media_extension("file.jpg").as_deref(), Some("jpg"));
        assert_eq!(media_extension("photo.final.PNG").as_deref(), Some("png"));
        assert_eq!(media_extension("noext"), None);
        assert_eq!(media_extension("trailing."), None);
        assert_eq!(media_extension(".jpg"), None);
        assert_eq!(media_extension("evil.jp/g"), None);
        assert_eq!(media_extension("a.verylongextension"), None);
        assert_eq!(media_extension("../../etc/passwd"), None);
    }
}
