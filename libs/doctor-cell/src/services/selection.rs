use tracing::{debug, info, warn};

use crate::models::{Doctor, DoctorError, DirectorySnapshot};
use crate::services::directory::DoctorDirectory;

/// Per-session view over the directory: the current filter result and at
/// most one selected doctor. The selection is held by id and resolved
/// against the directory on demand.
#[derive(Debug, Clone)]
pub struct DirectorySelection {
    specialty_filter: Option<String>,
    filtered_doctors: Vec<Doctor>,
    selected_doctor_id: Option<u32>,
}

impl DirectorySelection {
    pub fn new(directory: &DoctorDirectory) -> Self {
        Self {
            specialty_filter: None,
            filtered_doctors: directory.doctors().to_vec(),
            selected_doctor_id: None,
        }
    }

    pub fn filtered_doctors(&self) -> &[Doctor] {
        &self.filtered_doctors
    }

    pub fn specialty_filter(&self) -> Option<&str> {
        self.specialty_filter.as_deref()
    }

    pub fn selected_doctor_id(&self) -> Option<u32> {
        self.selected_doctor_id
    }

    pub fn selected<'a>(&self, directory: &'a DoctorDirectory) -> Option<&'a Doctor> {
        self.selected_doctor_id.and_then(|id| directory.find(id))
    }

    pub fn is_selected(&self, doctor_id: u32) -> bool {
        self.selected_doctor_id == Some(doctor_id)
    }

    /// Selects `doctor`, replacing any previous selection. Unavailable doctors
    /// are rejected and the previous selection is kept.
    pub fn select(&mut self, doctor: &Doctor) -> Result<(), DoctorError> {
        if !doctor.available {
            warn!("Rejected selection of unavailable doctor {}", doctor.id);
            return Err(DoctorError::Unavailable {
                id: doctor.id,
                name: doctor.name.clone(),
            });
        }

        info!("Selected doctor {} ({})", doctor.id, doctor.name);
        self.selected_doctor_id = Some(doctor.id);
        Ok(())
    }

    pub fn clear(&mut self) {
        if self.selected_doctor_id.take().is_some() {
            debug!("Cleared doctor selection");
        }
    }

    /// Replaces the filtered list and drops the selection.
    pub fn apply_filter(&mut self, directory: &DoctorDirectory, specialty: Option<&str>) {
        let specialty = specialty.filter(|s| !s.is_empty());
        self.filtered_doctors = directory.filter_by_specialty(specialty);
        self.specialty_filter = specialty.map(str::to_string);
        self.clear();
    }

    pub fn snapshot(&self, directory: &DoctorDirectory) -> DirectorySnapshot {
        DirectorySnapshot {
            specialty_filter: self.specialty_filter.clone(),
            doctors: self.filtered_doctors.clone(),
            selected_doctor: self.selected(directory).cloned(),
        }
    }
}
