use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, instrument, warn};

use doctor_cell::services::render::{render_directory, render_preview};
use doctor_cell::{DirectorySelection, DoctorDirectory, DoctorError};
use notification_cell::{ContactMethod, NotificationDispatcher};

use crate::models::{AppointmentForm, AppointmentSubmission, BookingSnapshot, SubmitOutcome};
use crate::services::validation::{min_appointment_date, FormValidator};
use crate::services::view::BookingView;

pub const SUCCESS_MESSAGE_HIDE_AFTER_MS: u64 = 4000;
pub const PAYMENT_REDIRECT_DELAY_MS: u64 = 1500;

/// State of one booking page visit.
#[derive(Debug, Clone)]
pub struct BookingSession {
    pub selection: DirectorySelection,
    pub contact_method: ContactMethod,
    pub appointment_draft: Option<AppointmentSubmission>,
}

impl BookingSession {
    pub fn new(directory: &DoctorDirectory) -> Self {
        Self {
            selection: DirectorySelection::new(directory),
            contact_method: ContactMethod::default(),
            appointment_draft: None,
        }
    }
}

/// Booking page controller: applies one user event to a session and renders
/// the result through a `BookingView`.
pub struct BookingPage {
    directory: Arc<DoctorDirectory>,
    validator: FormValidator,
    dispatcher: Arc<NotificationDispatcher>,
    payment_page_url: String,
}

impl BookingPage {
    pub fn new(
        directory: Arc<DoctorDirectory>,
        dispatcher: Arc<NotificationDispatcher>,
        payment_page_url: impl Into<String>,
    ) -> Self {
        Self {
            directory,
            validator: FormValidator::new(),
            dispatcher,
            payment_page_url: payment_page_url.into(),
        }
    }

    pub fn directory(&self) -> &DoctorDirectory {
        &self.directory
    }

    pub fn new_session(&self) -> BookingSession {
        BookingSession::new(&self.directory)
    }

    /// Initial render of a fresh page.
    pub fn open(&self, session: &BookingSession, today: NaiveDate, view: &mut impl BookingView) {
        info!("Booking page opened");
        self.render_directory(session, view);
        view.hide_preview();
        view.set_min_date(min_appointment_date(today));
        view.set_carrier_selector_visible(session.contact_method.needs_carrier());
    }

    pub fn filter(
        &self,
        session: &mut BookingSession,
        specialty: Option<&str>,
        view: &mut impl BookingView,
    ) {
        session.selection.apply_filter(&self.directory, specialty);
        view.hide_preview();
        self.render_directory(session, view);
    }

    pub fn select(
        &self,
        session: &mut BookingSession,
        doctor_id: u32,
        view: &mut impl BookingView,
    ) -> Result<(), DoctorError> {
        let doctor = self
            .directory
            .find(doctor_id)
            .ok_or(DoctorError::NotFound(doctor_id))?;

        if let Err(e) = session.selection.select(doctor) {
            view.alert(e.to_string());
            return Err(e);
        }

        self.render_directory(session, view);
        view.show_preview(render_preview(doctor));
        Ok(())
    }

    pub fn clear_selection(&self, session: &mut BookingSession, view: &mut impl BookingView) {
        session.selection.clear();
        view.hide_preview();
        self.render_directory(session, view);
    }

    pub fn change_contact_method(
        &self,
        session: &mut BookingSession,
        contact_method: ContactMethod,
        view: &mut impl BookingView,
    ) {
        session.contact_method = contact_method;
        view.set_carrier_selector_visible(contact_method.needs_carrier());
    }

    /// Validates the form; on success records the draft, sends notifications
    /// (best effort), shows the confirmation and hands over to the payment page.
    #[instrument(skip_all)]
    pub async fn submit(
        &self,
        session: &mut BookingSession,
        form: &AppointmentForm,
        view: &mut impl BookingView,
    ) -> SubmitOutcome {
        view.clear_field_errors();
        let report = self.validator.validate(form);

        if !report.valid {
            for (field, error) in &report.errors {
                view.show_field_error(*field, error.message.clone());
            }
            info!("Form validation failed");
            return SubmitOutcome::Rejected { report };
        }

        let selected = session.selection.selected(&self.directory).cloned();
        let submission = AppointmentSubmission::from_form(form, selected);
        session.appointment_draft = Some(submission.clone());

        info!(
            "Appointment booked for {} on {} at {} with {}",
            submission.patient_name,
            submission.appointment_date,
            submission.appointment_time,
            submission
                .selected_doctor
                .as_ref()
                .map(|d| d.name.as_str())
                .unwrap_or("TBD"),
        );

        let contact_method = self.resolve_contact_method(session, form);
        let notifications = self
            .dispatcher
            .dispatch(&submission.notice(), contact_method, form.carrier.as_deref())
            .await;

        view.show_success(SUCCESS_MESSAGE_HIDE_AFTER_MS);
        view.reset_form();
        session.contact_method = ContactMethod::default();
        view.set_carrier_selector_visible(false);
        view.navigate(self.payment_page_url.clone(), PAYMENT_REDIRECT_DELAY_MS);

        SubmitOutcome::Booked { submission, notifications }
    }

    pub fn snapshot(&self, session: &BookingSession) -> BookingSnapshot {
        BookingSnapshot {
            directory: session.selection.snapshot(&self.directory),
            contact_method: session.contact_method,
            carrier_selector_visible: session.contact_method.needs_carrier(),
            appointment_draft: session.appointment_draft.clone(),
        }
    }

    fn resolve_contact_method(&self, session: &BookingSession, form: &AppointmentForm) -> ContactMethod {
        match form.contact_method.as_deref() {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("{}; falling back to email", e);
                ContactMethod::Email
            }),
            None => session.contact_method,
        }
    }

    fn render_directory(&self, session: &BookingSession, view: &mut impl BookingView) {
        view.render_directory(render_directory(
            session.selection.filtered_doctors(),
            session.selection.selected_doctor_id(),
        ));
    }
}
