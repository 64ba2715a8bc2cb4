//! Display helpers for the text/JSON render surface.

use crate::types::{Amount, Timestamp};

/// `1234567.5` -> `"1 234 567,50 DZD"` (French grouping, as used in Algeria).
pub fn format_currency_dzd(amount: Amount) -> String {
    if !amount.is_finite() {
        return format!("{amount} DZD");
    }
    let fixed = format!("{:.2}", amount.abs());
    let (integer, decimals) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{grouped},{decimals} DZD")
}

/// `"Oct 18, 2026"`
pub fn format_date(at: Timestamp) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// `"Oct 18, 2026, 2:05 PM"`
pub fn format_datetime(at: Timestamp) -> String {
    at.format("%b %-d, %Y, %-I:%M %p").to_string()
}

/// Chart axis tick in thousands: `350000.0` -> `"350k"`.
pub fn axis_thousands(value: f64) -> String {
    format!("{}k", value / 1000.0)
}

/// Chart axis tick in millions: `1500000.0` -> `"1.5M"`.
pub fn axis_millions(value: f64) -> String {
    format!("{}M", value / 1_000_000.0)
}

/// Lenient number parsing for form inputs.
///
/// Skips leading whitespace and reads the longest decimal prefix
/// (sign, digits, fraction, exponent). Anything without digits, including
/// the empty string, yields NaN; trailing garbage is ignored.
pub fn parse_float(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Render a number the way a form input shows it: `7.0` -> `"7"`,
/// NaN -> `"NaN"`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value}")
    }
}
