use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::NotificationError;

/// Email-to-SMS gateways for the supported US carriers.
pub const CARRIER_GATEWAYS: &[(&str, &str)] = &[
    ("att", "txt.att.net"),
    ("verizon", "vtext.com"),
    ("tmobile", "tmomail.net"),
    ("sprint", "messaging.sprintpcs.com"),
    ("virgin", "vmobl.com"),
    ("metropcs", "mymetropcs.com"),
];

pub fn carrier_gateway(carrier: &str) -> Option<&'static str> {
    let carrier = carrier.trim();
    CARRIER_GATEWAYS
        .iter()
        .find(|(key, _)| *key == carrier)
        .map(|(_, gateway)| *gateway)
}

/// Address that delivers an email as a text message: the phone's digits at
/// the carrier gateway. `None` when the carrier is unknown or the phone has
/// no digits.
pub fn sms_gateway_address(phone: &str, carrier: &str) -> Option<String> {
    let gateway = carrier_gateway(carrier)?;
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    Some(format!("{}@{}", digits, gateway))
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContactMethod {
    #[default]
    Email,
    Sms,
    Both,
}

impl ContactMethod {
    pub fn includes_email(self) -> bool {
        matches!(self, ContactMethod::Email | ContactMethod::Both)
    }

    pub fn includes_sms(self) -> bool {
        matches!(self, ContactMethod::Sms | ContactMethod::Both)
    }

    /// Whether the carrier selector has to be shown for this method.
    pub fn needs_carrier(self) -> bool {
        self.includes_sms()
    }
}

impl fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactMethod::Email => write!(f, "email"),
            ContactMethod::Sms => write!(f, "sms"),
            ContactMethod::Both => write!(f, "both"),
        }
    }
}

impl FromStr for ContactMethod {
    type Err = NotificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "email" => Ok(ContactMethod::Email),
            "sms" => Ok(ContactMethod::Sms),
            "both" => Ok(ContactMethod::Both),
            other => Err(NotificationError::UnknownContactMethod(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Sms,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Email => write!(f, "email"),
            Channel::Sms => write!(f, "sms"),
        }
    }
}

/// Booking details handed to the notification template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentNotice {
    pub patient_name: String,
    pub patient_email: String,
    pub patient_phone: String,
    pub appointment_date: String,
    pub appointment_time: String,
    pub reason: String,
    pub doctor_name: Option<String>,
    pub doctor_times: Option<String>,
}

impl AppointmentNotice {
    /// Template parameters shared by every channel; `to_email` is added per send.
    pub fn template_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("patient_name".into(), Value::String(self.patient_name.clone()));
        params.insert("patient_email".into(), Value::String(self.patient_email.clone()));
        params.insert("patient_phone".into(), Value::String(self.patient_phone.clone()));
        params.insert("appointment_date".into(), Value::String(self.appointment_date.clone()));
        params.insert("appointment_time".into(), Value::String(self.appointment_time.clone()));
        params.insert("reason".into(), Value::String(self.reason.clone()));
        params.insert(
            "doctor_name".into(),
            Value::String(self.doctor_name.clone().unwrap_or_else(|| "TBD".to_string())),
        );
        params.insert(
            "doctor_times".into(),
            Value::String(self.doctor_times.clone().unwrap_or_default()),
        );
        params
    }
}

/// One message the dispatcher intends to send.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedSend {
    pub channel: Channel,
    pub recipient: String,
    pub params: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SendReceipt {
    pub status: u16,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChannelStatus {
    Sent { receipt: SendReceipt },
    Failed { reason: String },
    Skipped { reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelOutcome {
    pub channel: Channel,
    pub recipient: Option<String>,
    #[serde(flatten)]
    pub status: ChannelStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DispatchReport {
    /// False when no notification client was available.
    pub enabled: bool,
    pub outcomes: Vec<ChannelOutcome>,
}

impl DispatchReport {
    pub fn disabled() -> Self {
        Self { enabled: false, outcomes: Vec::new() }
    }

    pub fn sent_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ChannelStatus::Sent { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ChannelStatus::Failed { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ChannelStatus::Skipped { .. }))
            .count()
    }
}
