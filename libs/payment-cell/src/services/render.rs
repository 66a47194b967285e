use shared_utils::{escape_html, format_usd};

use crate::models::TransactionResult;

pub const CLINIC_NAME: &str = "MedTasks Clinic";

pub fn processing_html() -> String {
    "<h4>Processing payment…</h4><p>Please wait.</p>".to_string()
}

pub fn success_html(result: &TransactionResult) -> String {
    format!(
        r#"<h4>Payment Successful</h4>
<p>Transaction ID: <strong>{id}</strong></p>
<p>Amount: <strong>{amount}</strong></p>
<p>Paid by: <strong>{payer}</strong></p>
<p class="payment-note">Your appointment is confirmed. A receipt has been sent to your email.</p>"#,
        id = escape_html(&result.id),
        amount = format_usd(result.amount),
        payer = escape_html(&result.payer_name),
    )
}

pub fn failure_html() -> String {
    r#"<h4 class="payment-failed">Payment Failed</h4>
<p>Transaction could not be completed. Try again or use a different card.</p>"#
        .to_string()
}

/// Summary panel while the payer is typing an amount.
pub fn summary_for_amount(amount: f64) -> String {
    format!(
        r#"<p><strong>Recipient:</strong> {clinic}</p>
<p><strong>Amount:</strong> {amount}</p>
<p><strong>Transaction fee:</strong> None (demo only)</p>
<p><strong>Refund policy:</strong> Demo page, no real refund necessary</p>"#,
        clinic = CLINIC_NAME,
        amount = format_usd(amount),
    )
}

/// Summary panel after a successful payment.
pub fn settled_summary_html() -> String {
    format!(
        r#"<p><strong>Recipient:</strong> {}</p>
<p><strong>Transaction fee:</strong> None</p>
<p><strong>Processing:</strong> Instant</p>"#,
        CLINIC_NAME
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_amount, PaymentOutcome};

    #[test]
    fn test_success_html_escapes_payer() {
        let result = TransactionResult {
            id: "DEMO-ABC12345".to_string(),
            outcome: PaymentOutcome::Success,
            amount: 1250.0,
            payer_name: "<Ann>".to_string(),
        };
        let html = success_html(&result);
        assert!(html.contains("DEMO-ABC12345"));
        assert!(html.contains("$1,250.00"));
        assert!(html.contains("&lt;Ann&gt;"));
    }

    #[test]
    fn test_receipt_for_large_and_exponent_amounts() {
        let result = TransactionResult {
            id: "DEMO-ABC12345".to_string(),
            outcome: PaymentOutcome::Success,
            amount: parse_amount("100000000000000000000000"),
            payer_name: "Ann".to_string(),
        };
        assert!(success_html(&result).contains("$100,000,000,000,000,000,000,000.00"));
        assert!(summary_for_amount(parse_amount("1e3")).contains("$1,000.00"));
    }

    #[test]
    fn test_summary_for_amount() {
        assert!(summary_for_amount(75.5).contains("$75.50"));
    }
}
