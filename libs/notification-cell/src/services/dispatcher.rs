use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tracing::{info, instrument, warn};

use shared_config::AppConfig;

use crate::models::{
    sms_gateway_address, AppointmentNotice, Channel, ChannelOutcome, ChannelStatus,
    ContactMethod, DispatchReport, PlannedSend,
};
use crate::services::emailjs::{EmailJsClient, NotificationClient};

/// Best-effort fan-out of booking confirmations over email and SMS gateways.
/// Never fails: missing configuration, skipped channels and send errors are
/// reported and logged only.
pub struct NotificationDispatcher {
    client: Option<Arc<dyn NotificationClient>>,
    service_id: String,
    template_id: String,
}

impl NotificationDispatcher {
    pub fn new(
        client: Arc<dyn NotificationClient>,
        service_id: impl Into<String>,
        template_id: impl Into<String>,
    ) -> Self {
        Self {
            client: Some(client),
            service_id: service_id.into(),
            template_id: template_id.into(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            client: None,
            service_id: String::new(),
            template_id: String::new(),
        }
    }

    /// EmailJS-backed dispatcher, or a disabled one when credentials are missing.
    pub fn from_config(config: &AppConfig) -> Self {
        match EmailJsClient::new(config) {
            Ok(client) => Self::new(
                Arc::new(client),
                config.emailjs_service_id.clone(),
                config.emailjs_template_id.clone(),
            ),
            Err(e) => {
                warn!("Notifications disabled: {}", e);
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Builds one message per requested channel. SMS is skipped when the
    /// carrier is unknown or the phone number is empty.
    pub fn plan(
        notice: &AppointmentNotice,
        contact_method: ContactMethod,
        carrier: Option<&str>,
    ) -> (Vec<PlannedSend>, Vec<ChannelOutcome>) {
        let base_params = notice.template_params();
        let mut sends = Vec::new();
        let mut skipped = Vec::new();

        if contact_method.includes_email() {
            let mut params = base_params.clone();
            params.insert("to_email".into(), Value::String(notice.patient_email.clone()));
            sends.push(PlannedSend {
                channel: Channel::Email,
                recipient: notice.patient_email.clone(),
                params,
            });
        }

        if contact_method.includes_sms() {
            match sms_gateway_address(&notice.patient_phone, carrier.unwrap_or_default()) {
                Some(address) => {
                    let mut params = base_params;
                    params.insert("to_email".into(), Value::String(address.clone()));
                    sends.push(PlannedSend {
                        channel: Channel::Sms,
                        recipient: address,
                        params,
                    });
                }
                None => {
                    warn!("SMS not sent: carrier or phone missing/unsupported");
                    skipped.push(ChannelOutcome {
                        channel: Channel::Sms,
                        recipient: None,
                        status: ChannelStatus::Skipped {
                            reason: "carrier or phone missing/unsupported".to_string(),
                        },
                    });
                }
            }
        }

        (sends, skipped)
    }

    #[instrument(skip(self, notice))]
    pub async fn dispatch(
        &self,
        notice: &AppointmentNotice,
        contact_method: ContactMethod,
        carrier: Option<&str>,
    ) -> DispatchReport {
        let Some(client) = self.client.as_ref() else {
            warn!("EmailJS not configured. Skipping email/SMS notifications.");
            return DispatchReport::disabled();
        };

        let (sends, mut outcomes) = Self::plan(notice, contact_method, carrier);

        let attempts = sends.into_iter().map(|send| {
            let client = Arc::clone(client);
            async move {
                let result = client
                    .send(&self.service_id, &self.template_id, send.params)
                    .await;
                let status = match result {
                    Ok(receipt) => {
                        info!("Notification sent via {} to {}", send.channel, send.recipient);
                        ChannelStatus::Sent { receipt }
                    }
                    Err(e) => {
                        warn!("Notification failed via {}: {}", send.channel, e);
                        ChannelStatus::Failed { reason: e.to_string() }
                    }
                };
                ChannelOutcome {
                    channel: send.channel,
                    recipient: Some(send.recipient),
                    status,
                }
            }
        });

        let mut settled = join_all(attempts).await;
        settled.append(&mut outcomes);

        DispatchReport {
            enabled: true,
            outcomes: settled,
        }
    }
}
