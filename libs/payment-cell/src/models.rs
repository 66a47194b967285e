use serde::{Deserialize, Serialize};

use crate::error::{PaymentError, INVALID_PAYMENT_MESSAGE};

/// Payment form as posted by the page. `amount` is kept as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaymentForm {
    pub payer_name: String,
    pub amount: String,
    pub note: Option<String>,
}

/// Parses the leading decimal number of `raw`, the way a browser number
/// field is read: "50.00" -> 50.0, "1e3" -> 1000.0, "12abc" -> 12.0,
/// garbage -> 0.0.
pub fn parse_amount(raw: &str) -> f64 {
    let raw = raw.trim();
    let prefix_len = numeric_prefix_len(raw);

    (1..=prefix_len)
        .rev()
        .find_map(|len| raw[..len].parse::<f64>().ok())
        .filter(|amount| amount.is_finite())
        .unwrap_or(0.0)
}

/// Length of the leading `[+-]?[0-9.]*([eE][+-]?[0-9]+)?` run. The exponent
/// only counts when at least one digit follows the marker.
fn numeric_prefix_len(raw: &str) -> usize {
    let bytes = raw.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'.') {
        end += 1;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let digits_start = exponent_end;
        while exponent_end < bytes.len() && bytes[exponent_end].is_ascii_digit() {
            exponent_end += 1;
        }
        if exponent_end > digits_start {
            end = exponent_end;
        }
    }

    end
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRequest {
    pub payer_name: String,
    pub amount: f64,
    pub note: Option<String>,
}

impl PaymentRequest {
    /// Payer name must be non-blank and the amount strictly positive.
    pub fn from_form(form: &PaymentForm) -> Result<Self, PaymentError> {
        let payer_name = form.payer_name.trim();
        let amount = parse_amount(&form.amount);

        if payer_name.is_empty() || amount <= 0.0 {
            return Err(PaymentError::InvalidInput(INVALID_PAYMENT_MESSAGE.to_string()));
        }

        Ok(Self {
            payer_name: payer_name.to_string(),
            amount,
            note: form.note.clone().filter(|n| !n.trim().is_empty()),
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOutcome {
    Success,
    Failure,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionResult {
    pub id: String,
    pub outcome: PaymentOutcome,
    pub amount: f64,
    pub payer_name: String,
}

/// Everything decided for one attempt at submit time; applied after `delay_ms`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentAttempt {
    pub attempt: u64,
    pub transaction_id: String,
    pub delay_ms: u64,
    pub outcome: PaymentOutcome,
    pub request: PaymentRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PaymentStatus {
    Idle,
    Submitting { attempt: u64 },
    Success { result: TransactionResult },
    Failure { result: TransactionResult },
}

impl PaymentStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, PaymentStatus::Submitting { .. })
    }
}

/// Current contents of the page's result and summary panels.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaymentPanel {
    pub result_html: Option<String>,
    pub summary_html: String,
    pub last_alert: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentSnapshot {
    pub status: PaymentStatus,
    pub form: PaymentForm,
    pub panel: PaymentPanel,
}
