use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use shared_config::AppConfig;

use crate::error::NotificationError;
use crate::models::SendReceipt;

/// Template-based message sender. Mirrors the EmailJS `send` call.
#[async_trait]
pub trait NotificationClient: Send + Sync {
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: Map<String, Value>,
    ) -> Result<SendReceipt, NotificationError>;
}

#[derive(Debug, Serialize)]
struct EmailJsSendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: Map<String, Value>,
}

/// EmailJS REST client.
/// Based on: https://www.emailjs.com/docs/rest-api/send/
#[derive(Debug)]
pub struct EmailJsClient {
    client: Client,
    public_key: String,
    base_url: String,
}

impl EmailJsClient {
    pub const SEND_PATH: &'static str = "/api/v1.0/email/send";

    pub fn new(config: &AppConfig) -> Result<Self, NotificationError> {
        if !config.is_notification_configured() {
            return Err(NotificationError::NotConfigured);
        }

        Ok(Self {
            client: Client::new(),
            public_key: config.emailjs_public_key.clone(),
            base_url: config.emailjs_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl NotificationClient for EmailJsClient {
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: Map<String, Value>,
    ) -> Result<SendReceipt, NotificationError> {
        let url = format!("{}{}", self.base_url, Self::SEND_PATH);
        let request_body = EmailJsSendRequest {
            service_id,
            template_id,
            user_id: &self.public_key,
            template_params: params,
        };

        debug!("Sending EmailJS request to: {}", url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            error!("EmailJS send failed: {} - {}", status, response_text);
            return Err(NotificationError::Api {
                status: status.as_u16(),
                message: response_text,
            });
        }

        info!("EmailJS accepted message: {}", status);
        Ok(SendReceipt {
            status: status.as_u16(),
            text: response_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_client_requires_configuration() {
        let result = EmailJsClient::new(&AppConfig::default());
        assert_matches!(result, Err(NotificationError::NotConfigured));
    }

    #[test]
    fn test_base_url_is_normalised() {
        let config = AppConfig {
            emailjs_public_key: "key".into(),
            emailjs_service_id: "service".into(),
            emailjs_template_id: "template".into(),
            emailjs_base_url: "http://mock/".into(),
            ..AppConfig::default()
        };
        let client = EmailJsClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://mock");
    }
}
