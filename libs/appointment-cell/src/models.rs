// libs/appointment-cell/src/models.rs
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use doctor_cell::{DirectorySnapshot, Doctor};
use notification_cell::{AppointmentNotice, ContactMethod, DispatchReport};

// ==============================================================================
// FORM MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Email,
    Phone,
    Date,
    Time,
    Reason,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Date,
        FormField::Time,
        FormField::Reason,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Date => "date",
            FormField::Time => "time",
            FormField::Reason => "reason",
        }
    }

    pub fn required_message(self) -> &'static str {
        match self {
            FormField::Name => "Please enter your full name",
            FormField::Email => "Please enter your email",
            FormField::Phone => "Please enter your phone number",
            FormField::Date => "Please select an appointment date",
            FormField::Time => "Please select an appointment time",
            FormField::Reason => "Please describe your reason for visit",
        }
    }

    /// Only email and phone carry a format rule.
    pub fn invalid_format_message(self) -> Option<&'static str> {
        match self {
            FormField::Email => Some("Please enter a valid email"),
            FormField::Phone => Some("Please enter a valid phone number"),
            _ => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw booking form as posted by the page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppointmentForm {
    pub patient_name: String,
    pub patient_email: String,
    pub patient_phone: String,
    pub appointment_date: String,
    pub appointment_time: String,
    pub reason: String,
    pub contact_method: Option<String>,
    pub carrier: Option<String>,
}

impl AppointmentForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.patient_name,
            FormField::Email => &self.patient_email,
            FormField::Phone => &self.patient_phone,
            FormField::Date => &self.appointment_date,
            FormField::Time => &self.appointment_time,
            FormField::Reason => &self.reason,
        }
    }

    pub fn fields(&self) -> BTreeMap<FormField, String> {
        FormField::ALL
            .iter()
            .map(|field| (*field, self.value(*field).to_string()))
            .collect()
    }
}

// ==============================================================================
// VALIDATION MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    Required,
    InvalidFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldError {
    pub kind: ValidationErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: BTreeMap<FormField, FieldError>,
}

impl ValidationReport {
    pub fn error_kind(&self, field: FormField) -> Option<ValidationErrorKind> {
        self.errors.get(&field).map(|e| e.kind)
    }

    pub fn messages(&self) -> BTreeMap<FormField, String> {
        self.errors
            .iter()
            .map(|(field, error)| (*field, error.message.clone()))
            .collect()
    }
}

// ==============================================================================
// SUBMISSION MODELS
// ==============================================================================

/// Validated, trimmed booking. Logged and handed to notifications, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentSubmission {
    pub patient_name: String,
    pub patient_email: String,
    pub patient_phone: String,
    pub appointment_date: String,
    pub appointment_time: String,
    pub reason: String,
    pub selected_doctor: Option<Doctor>,
}

impl AppointmentSubmission {
    pub fn from_form(form: &AppointmentForm, selected_doctor: Option<Doctor>) -> Self {
        Self {
            patient_name: form.patient_name.trim().to_string(),
            patient_email: form.patient_email.trim().to_string(),
            patient_phone: form.patient_phone.trim().to_string(),
            appointment_date: form.appointment_date.trim().to_string(),
            appointment_time: form.appointment_time.trim().to_string(),
            reason: form.reason.trim().to_string(),
            selected_doctor,
        }
    }

    pub fn notice(&self) -> AppointmentNotice {
        AppointmentNotice {
            patient_name: self.patient_name.clone(),
            patient_email: self.patient_email.clone(),
            patient_phone: self.patient_phone.clone(),
            appointment_date: self.appointment_date.clone(),
            appointment_time: self.appointment_time.clone(),
            reason: self.reason.clone(),
            doctor_name: self.selected_doctor.as_ref().map(|d| d.name.clone()),
            doctor_times: self.selected_doctor.as_ref().map(|d| d.times.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Rejected {
        report: ValidationReport,
    },
    Booked {
        submission: AppointmentSubmission,
        notifications: DispatchReport,
    },
}

// ==============================================================================
// SESSION MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookingSnapshot {
    pub directory: DirectorySnapshot,
    pub contact_method: ContactMethod,
    pub carrier_selector_visible: bool,
    pub appointment_draft: Option<AppointmentSubmission>,
}
