use tracing::debug;

use crate::catalog::default_doctors;
use crate::models::Doctor;

/// Read-only doctor roster with specialty filtering.
#[derive(Debug, Clone)]
pub struct DoctorDirectory {
    doctors: Vec<Doctor>,
}

impl DoctorDirectory {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        Self { doctors }
    }

    pub fn with_default_catalog() -> Self {
        Self::new(default_doctors())
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn find(&self, doctor_id: u32) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == doctor_id)
    }

    /// Doctors whose specialty equals `specialty` exactly, in roster order.
    /// An absent or empty specialty returns the whole roster.
    pub fn filter_by_specialty(&self, specialty: Option<&str>) -> Vec<Doctor> {
        let filtered: Vec<Doctor> = match specialty.filter(|s| !s.is_empty()) {
            Some(specialty) => self
                .doctors
                .iter()
                .filter(|d| d.specialty == specialty)
                .cloned()
                .collect(),
            None => self.doctors.clone(),
        };

        debug!("Specialty filter {:?} matched {} doctors", specialty, filtered.len());
        filtered
    }

    /// Distinct specialties in first-seen order, for the filter dropdown.
    pub fn specialties(&self) -> Vec<String> {
        let mut specialties: Vec<String> = Vec::new();
        for doctor in &self.doctors {
            if !specialties.contains(&doctor.specialty) {
                specialties.push(doctor.specialty.clone());
            }
        }
        specialties
    }
}

impl Default for DoctorDirectory {
    fn default() -> Self {
        Self::with_default_catalog()
    }
}
