use crate::models::PaymentPanel;

/// Rendering surface of the payment page.
pub trait PaymentView {
    fn show_processing(&mut self, html: String);
    fn show_result(&mut self, html: String);
    fn hide_result(&mut self);
    fn update_summary(&mut self, html: String);
    fn alert(&mut self, message: String);
}

impl PaymentView for PaymentPanel {
    fn show_processing(&mut self, html: String) {
        self.result_html = Some(html);
    }

    fn show_result(&mut self, html: String) {
        self.result_html = Some(html);
    }

    fn hide_result(&mut self) {
        self.result_html = None;
    }

    fn update_summary(&mut self, html: String) {
        self.summary_html = html;
    }

    fn alert(&mut self, message: String) {
        self.last_alert = Some(message);
    }
}
