//! Lenient number parsing and money formatting.
//!
//! Form inputs and some server payloads carry prices as text such as
//! `" 12.50"` or `"7 tablets"`. These helpers read the longest numeric
//! prefix the way a browser's `parseFloat` does, so "7 tablets" is 7 and
//! "abc" is not a number.

/// Parse the longest leading decimal literal of `input`.
///
/// Leading whitespace is skipped. An optional sign, `Infinity`, digits with
/// an optional fraction, and an optional exponent are accepted. Returns
/// `None` when no digits are found.
pub fn parse_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let mut int_digits = 0;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
        int_digits += 1;
    }

    let mut frac_digits = 0;
    if end < len && bytes[end] == b'.' {
        let mut probe = end + 1;
        while probe < len && bytes[probe].is_ascii_digit() {
            probe += 1;
            frac_digits += 1;
        }
        if int_digits > 0 || frac_digits > 0 {
            end = probe;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut probe = end + 1;
        if probe < len && (bytes[probe] == b'+' || bytes[probe] == b'-') {
            probe += 1;
        }
        let exp_start = probe;
        while probe < len && bytes[probe].is_ascii_digit() {
            probe += 1;
        }
        if probe > exp_start {
            end = probe;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Format an amount with exactly two decimals.
pub fn format_amount(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // Avoid "-0.00"
        return "0.00".to_string();
    }
    format!("{:.2}", value)
}

/// Format an amount as dollars, e.g. `$12.50`.
pub fn format_currency(value: f64) -> String {
    format!("${}", format_amount(value))
}
