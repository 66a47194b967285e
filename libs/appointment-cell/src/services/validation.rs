use std::collections::BTreeMap;

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::models::{AppointmentForm, FieldError, FormField, ValidationErrorKind, ValidationReport};

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const PHONE_PATTERN: &str = r"^[0-9\s+()\-]{10,}$";

/// Booking form rules. Every rule runs on every pass; nothing short-circuits.
pub struct FormValidator {
    email_pattern: Regex,
    phone_pattern: Regex,
}

impl FormValidator {
    pub fn new() -> Self {
        Self {
            email_pattern: Regex::new(EMAIL_PATTERN).expect("email pattern is valid"),
            phone_pattern: Regex::new(PHONE_PATTERN).expect("phone pattern is valid"),
        }
    }

    pub fn is_valid_email(&self, email: &str) -> bool {
        self.email_pattern.is_match(email)
    }

    pub fn is_valid_phone(&self, phone: &str) -> bool {
        self.phone_pattern.is_match(phone)
    }

    pub fn validate(&self, form: &AppointmentForm) -> ValidationReport {
        self.validate_fields(&form.fields())
    }

    /// Validates only the fields present in `fields`.
    pub fn validate_fields(&self, fields: &BTreeMap<FormField, String>) -> ValidationReport {
        let errors: BTreeMap<FormField, FieldError> = fields
            .iter()
            .filter_map(|(field, value)| {
                self.check_field(*field, value).map(|error| (*field, error))
            })
            .collect();

        debug!("Form validation produced {} errors", errors.len());

        ValidationReport {
            valid: errors.is_empty(),
            errors,
        }
    }

    fn check_field(&self, field: FormField, value: &str) -> Option<FieldError> {
        let value = value.trim();

        if value.is_empty() {
            return Some(FieldError {
                kind: ValidationErrorKind::Required,
                message: field.required_message().to_string(),
            });
        }

        let well_formed = match field {
            FormField::Email => self.is_valid_email(value),
            FormField::Phone => self.is_valid_phone(value),
            _ => true,
        };

        if well_formed {
            return None;
        }

        field.invalid_format_message().map(|message| FieldError {
            kind: ValidationErrorKind::InvalidFormat,
            message: message.to_string(),
        })
    }
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimum value for the date picker. Advisory only; `validate` does not
/// re-check the range.
pub fn min_appointment_date(today: NaiveDate) -> String {
    today.format("%Y-%m-%d").to_string()
}
