/// Above this magnitude an `f64` cannot hold cents, so the value is printed
/// as stored instead of being rounded through a scaled copy.
const CENT_PRECISION_LIMIT: f64 = 1e15;

/// Formats an amount as US dollars with thousands separators and two
/// decimals, e.g. `1234.5` -> `$1,234.50`. Non-finite input formats as zero.
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0.00".to_string();
    }

    let magnitude = amount.abs();
    let rounded = if magnitude < CENT_PRECISION_LIMIT {
        (magnitude * 100.0).round() / 100.0
    } else {
        magnitude
    };

    // `Display` for f64 prints the shortest round-trip digits, never in
    // exponent form.
    let plain = rounded.to_string();
    let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && rounded > 0.0 { "-" } else { "" };
    format!("{}${}.{:0<2.2}", sign, grouped, fraction)
}
