use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;

/// Reference record for one clinician in the directory. Loaded once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    pub id: u32,
    pub name: String,
    pub specialty: String,
    /// Display label, e.g. "8 years".
    pub experience: String,
    pub phone: String,
    pub avatar: String,
    pub photo: Option<String>,
    pub available: bool,
    /// Display label for the consulting hours, e.g. "9:00 AM - 5:00 PM".
    pub times: String,
}

impl Doctor {
    pub fn has_photo(&self) -> bool {
        self.photo.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// Rendered state of the directory after a filter or selection change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectorySnapshot {
    pub specialty_filter: Option<String>,
    pub doctors: Vec<Doctor>,
    pub selected_doctor: Option<Doctor>,
}

// Error types specific to doctor operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DoctorError {
    #[error("Doctor not found: {0}")]
    NotFound(u32),

    #[error("{name} is currently unavailable. Please select another doctor or choose a different time.")]
    Unavailable { id: u32, name: String },
}

impl From<DoctorError> for AppError {
    fn from(error: DoctorError) -> Self {
        match error {
            DoctorError::NotFound(_) => AppError::NotFound(error.to_string()),
            DoctorError::Unavailable { .. } => AppError::Unprocessable(error.to_string()),
        }
    }
}
