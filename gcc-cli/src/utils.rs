use gcc_core::calculations::common::{round_currency, round_hourly_rate};
use rust_decimal::Decimal;
use thiserror::Error;

/// Prefix used for every monthly amount.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Prefix used for the hourly per-head rate.
pub const HOURLY_RATE_SYMBOL: &str = "$";

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
/// Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::warn!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Inserts a comma between every group of three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a monthly amount as whole currency units with thousands separators.
///
/// ```
/// use gcc_cli::utils::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(1234567.5)), "₹1,234,568");
/// ```
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_currency(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().trunc().to_string();
    format!("{sign}{CURRENCY_SYMBOL}{}", group_thousands(&digits))
}

/// Formats the hourly per-head rate with six fixed decimals.
pub fn format_hourly_rate(value: Decimal) -> String {
    format!("{HOURLY_RATE_SYMBOL}{:.6}", round_hourly_rate(value))
}

/// Renders a boolean toggle the way the report shows it.
pub fn yes_no(enabled: bool) -> &'static str {
    if enabled { "Yes" } else { "No" }
}
