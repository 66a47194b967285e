use std::sync::Arc;
use serde_json::{json, Value};

use shared_config::AppConfig;

pub struct TestConfig {
    pub emailjs_public_key: String,
    pub emailjs_service_id: String,
    pub emailjs_template_id: String,
    pub emailjs_base_url: String,
    pub payment_page_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            emailjs_public_key: "test-public-key".to_string(),
            emailjs_service_id: "service_test".to_string(),
            emailjs_template_id: "template_test".to_string(),
            emailjs_base_url: "http://localhost:54321".to_string(),
            payment_page_url: "payout.html".to_string(),
        }
    }
}

impl TestConfig {
    /// Config with EmailJS pointed at a mock server.
    pub fn with_emailjs_base_url(base_url: &str) -> Self {
        Self {
            emailjs_base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Config without EmailJS credentials.
    pub fn unconfigured() -> Self {
        Self {
            emailjs_public_key: String::new(),
            emailjs_service_id: String::new(),
            emailjs_template_id: String::new(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            emailjs_public_key: self.emailjs_public_key.clone(),
            emailjs_service_id: self.emailjs_service_id.clone(),
            emailjs_template_id: self.emailjs_template_id.clone(),
            emailjs_base_url: self.emailjs_base_url.clone(),
            payment_page_url: self.payment_page_url.clone(),
            server_port: 0,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestPatient {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub reason: String,
}

impl Default for TestPatient {
    fn default() -> Self {
        Self {
            name: "Ann Patient".to_string(),
            email: "ann@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            date: "2030-01-15".to_string(),
            time: "10:30".to_string(),
            reason: "Annual check-up".to_string(),
        }
    }
}

impl TestPatient {
    /// Booking form body as the page posts it.
    pub fn form_json(&self, contact_method: &str, carrier: Option<&str>) -> Value {
        json!({
            "patient_name": self.name,
            "patient_email": self.email,
            "patient_phone": self.phone,
            "appointment_date": self.date,
            "appointment_time": self.time,
            "reason": self.reason,
            "contact_method": contact_method,
            "carrier": carrier
        })
    }
}

pub struct MockEmailJsResponses;

impl MockEmailJsResponses {
    pub const SEND_PATH: &'static str = "/api/v1.0/email/send";

    pub fn ok_body() -> &'static str {
        "OK"
    }

    pub fn error_body(message: &str) -> Value {
        json!({
            "error": message
        })
    }
}
