use serde::Serialize;

use crate::models::FormField;

/// Rendering surface of the booking page. The controller only talks to the
/// page through this trait.
pub trait BookingView {
    fn render_directory(&mut self, html: String);
    fn show_preview(&mut self, html: String);
    fn hide_preview(&mut self);
    fn set_min_date(&mut self, date: String);
    fn set_carrier_selector_visible(&mut self, visible: bool);
    fn clear_field_errors(&mut self);
    fn show_field_error(&mut self, field: FormField, message: String);
    fn alert(&mut self, message: String);
    fn show_success(&mut self, hide_after_ms: u64);
    fn reset_form(&mut self);
    fn navigate(&mut self, url: String, delay_ms: u64);
}

/// One instruction for the page, as sent back over HTTP.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BookingViewUpdate {
    RenderDirectory { html: String },
    ShowPreview { html: String },
    HidePreview,
    SetMinDate { date: String },
    SetCarrierSelectorVisible { visible: bool },
    ClearFieldErrors,
    ShowFieldError { field: FormField, message: String },
    Alert { message: String },
    ShowSuccess { hide_after_ms: u64 },
    ResetForm,
    Navigate { url: String, delay_ms: u64 },
}

/// Collects updates in order so a remote page can replay them.
#[derive(Debug, Default)]
pub struct RecordingBookingView {
    updates: Vec<BookingViewUpdate>,
}

impl RecordingBookingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> &[BookingViewUpdate] {
        &self.updates
    }

    pub fn into_updates(self) -> Vec<BookingViewUpdate> {
        self.updates
    }
}

impl BookingView for RecordingBookingView {
    fn render_directory(&mut self, html: String) {
        self.updates.push(BookingViewUpdate::RenderDirectory { html });
    }

    fn show_preview(&mut self, html: String) {
        self.updates.push(BookingViewUpdate::ShowPreview { html });
    }

    fn hide_preview(&mut self) {
        self.updates.push(BookingViewUpdate::HidePreview);
    }

    fn set_min_date(&mut self, date: String) {
        self.updates.push(BookingViewUpdate::SetMinDate { date });
    }

    fn set_carrier_selector_visible(&mut self, visible: bool) {
        self.updates.push(BookingViewUpdate::SetCarrierSelectorVisible { visible });
    }

    fn clear_field_errors(&mut self) {
        self.updates.push(BookingViewUpdate::ClearFieldErrors);
    }

    fn show_field_error(&mut self, field: FormField, message: String) {
        self.updates.push(BookingViewUpdate::ShowFieldError { field, message });
    }

    fn alert(&mut self, message: String) {
        self.updates.push(BookingViewUpdate::Alert { message });
    }

    fn show_success(&mut self, hide_after_ms: u64) {
        self.updates.push(BookingViewUpdate::ShowSuccess { hide_after_ms });
    }

    fn reset_form(&mut self) {
        self.updates.push(BookingViewUpdate::ResetForm);
    }

    fn navigate(&mut self, url: String, delay_ms: u64) {
        self.updates.push(BookingViewUpdate::Navigate { url, delay_ms });
    }
}
