use std::env;
use tracing::warn;

pub const DEFAULT_EMAILJS_BASE_URL: &str = "https://api.emailjs.com";
pub const DEFAULT_PAYMENT_PAGE_URL: &str = "payout.html";
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Placeholder shipped in the sample environment; treated as "not configured".
pub const EMAILJS_PLACEHOLDER_KEY: &str = "YOUR_EMAILJS_PUBLIC_KEY";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub emailjs_public_key: String,
    pub emailjs_service_id: String,
    pub emailjs_template_id: String,
    pub emailjs_base_url: String,
    pub payment_page_url: String,
    pub server_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            emailjs_public_key: env::var("EMAILJS_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("EMAILJS_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            emailjs_service_id: env::var("EMAILJS_SERVICE_ID")
                .unwrap_or_else(|_| {
                    warn!("EMAILJS_SERVICE_ID not set, using empty value");
                    String::new()
                }),
            emailjs_template_id: env::var("EMAILJS_TEMPLATE_ID")
                .unwrap_or_else(|_| {
                    warn!("EMAILJS_TEMPLATE_ID not set, using empty value");
                    String::new()
                }),
            emailjs_base_url: env::var("EMAILJS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_EMAILJS_BASE_URL.to_string()),
            payment_page_url: env::var("PAYMENT_PAGE_URL")
                .unwrap_or_else(|_| DEFAULT_PAYMENT_PAGE_URL.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|port| match port.parse() {
                    Ok(port) => Some(port),
                    Err(_) => {
                        warn!("SERVER_PORT '{}' is not a valid port, using default", port);
                        None
                    }
                })
                .unwrap_or(DEFAULT_SERVER_PORT),
        };

        if !config.is_notification_configured() {
            warn!("EmailJS not configured - booking notifications will be skipped");
        }

        config
    }

    /// All three EmailJS values are present and the key is not the sample placeholder.
    pub fn is_notification_configured(&self) -> bool {
        !self.emailjs_public_key.is_empty()
            && self.emailjs_public_key != EMAILJS_PLACEHOLDER_KEY
            && !self.emailjs_service_id.is_empty()
            && !self.emailjs_template_id.is_empty()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            emailjs_public_key: String::new(),
            emailjs_service_id: String::new(),
            emailjs_template_id: String::new(),
            emailjs_base_url: DEFAULT_EMAILJS_BASE_URL.to_string(),
            payment_page_url: DEFAULT_PAYMENT_PAGE_URL.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}
