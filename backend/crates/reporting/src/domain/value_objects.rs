//! Domain Value Objects
//!
//! Status enums and validated coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ReportError, ReportResult};

// ============================================================================
// Incident Status
// ============================================================================

/// Incident lifecycle; transitions are driven by admins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    #[default]
    Reported,
    InProgress,
    Resolved,
}

impl IncidentStatus {
    pub const fn code(&self) -> &'static str {
        match self {
            IncidentStatus::Reported => "reported",
            IncidentStatus::InProgress => "in_progress",
            IncidentStatus::Resolved => "resolved",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "reported" => Some(IncidentStatus::Reported),
            "in_progress" => Some(IncidentStatus::InProgress),
            "resolved" => Some(IncidentStatus::Resolved),
            _ => None,
        }
    }

    /// Parse request input; empty and unknown values are validation errors
    pub fn parse(input: &str) -> ReportResult<Self> {
        Self::from_code(input.trim()).ok_or_else(|| {
            ReportError::validation("status must be one of: reported, in_progress, resolved")
        })
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Task Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const fn code(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }

    pub fn parse(input: &str) -> ReportResult<Self> {
        Self::from_code(input.trim()).ok_or_else(|| {
            ReportError::validation("status must be one of: pending, in_progress, completed")
        })
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Coordinates
// ============================================================================

/// WGS84 point, both components finite and in range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> ReportResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ReportError::validation(
                "latitude must be a number between -90 and 90",
            ));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ReportError::validation(
                "longitude must be a number between -180 and 180",
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}
