//! Validators for records returned by the list endpoint.
//!
//! Both validators take the raw JSON value of the field (`Value::Null` when
//! the key is absent) because the server gives no type guarantees.

use serde_json::Value;

use super::number::{format_currency, parse_float};
use crate::models::{NameValidation, PriceSeverity, PriceValidation, UNKNOWN_MEDICINE};

/// Minimum trimmed name length, in characters.
pub const MIN_NAME_CHARS: usize = 2;

/// Prices above this are flagged as unusually high.
pub const HIGH_PRICE_THRESHOLD: f64 = 1000.0;

/// Classify a record's name.
pub fn validate_name(raw: &Value) -> NameValidation {
    let trimmed = match raw.as_str().map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return NameValidation::invalid(UNKNOWN_MEDICINE, "Missing or empty name"),
    };

    if trimmed.chars().count() < MIN_NAME_CHARS {
        return NameValidation::invalid(trimmed, "Name too short");
    }

    NameValidation::valid(trimmed)
}

/// Classify a record's price.
///
/// Checks run in order: missing, not a number, negative, too high. The first
/// failing check decides the result.
pub fn validate_price(raw: &Value) -> PriceValidation {
    let number = match raw {
        Value::Null => {
            return PriceValidation::flagged(
                "Price not available",
                "Missing price",
                PriceSeverity::Missing,
            )
        }
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float(s),
        _ => None,
    };

    let Some(price) = number else {
        return PriceValidation::flagged(
            "Invalid price",
            "Price is not a number",
            PriceSeverity::Invalid,
        );
    };

    if price < 0.0 {
        return PriceValidation::flagged(
            format!("{} (Invalid)", format_currency(price)),
            "Negative price",
            PriceSeverity::Negative,
        );
    }

    if price > HIGH_PRICE_THRESHOLD {
        return PriceValidation::flagged(
            format_currency(price),
            "Unusually high price",
            PriceSeverity::High,
        );
    }

    PriceValidation::valid(format_currency(price))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_name_is_trimmed() {
        let result = validate_name(&json!("  Aspirin  "));
        assert_eq!(result, NameValidation::valid("Aspirin"));
    }

    #[test]
    fn test_missing_names() {
        for raw in [json!(null), json!(""), json!("   "), json!(42), json!({"a": 1})] {
            let result = validate_name(&raw);
            assert_eq!(result.value, "Unknown Medicine");
            assert!(result.has_issue);
            assert_eq!(result.issue.as_deref(), Some("Missing or empty name"));
        }
    }

    #[test]
    fn test_short_name() {
        let result = validate_name(&json!(" A "));
        assert_eq!(result.value, "A");
        assert_eq!(result.issue.as_deref(), Some("Name too short"));
    }

    #[test]
    fn test_short_name_counts_characters() {
        // Two characters, four bytes
        let result = validate_name(&json!("éé"));
        assert!(!result.has_issue);

        // One scalar value, even outside the basic plane
        let result = validate_name(&json!("💊"));
        assert_eq!(result.issue.as_deref(), Some("Name too short"));
        assert!(!validate_name(&json!("💊💊")).has_issue);
    }

    #[test]
    fn test_missing_price() {
        let result = validate_price(&json!(null));
        assert_eq!(result.severity, PriceSeverity::Missing);
        assert_eq!(result.display, "Price not available");
        assert_eq!(result.issue.as_deref(), Some("Missing price"));
    }

    #[test]
    fn test_invalid_price() {
        for raw in [json!("abc"), json!(true), json!([5]), json!({"amount": 5})] {
            let result = validate_price(&raw);
            assert_eq!(result.severity, PriceSeverity::Invalid, "{}", raw);
            assert_eq!(result.display, "Invalid price");
        }
    }

    #[test]
    fn test_negative_price() {
        let result = validate_price(&json!(-5));
        assert_eq!(result.severity, PriceSeverity::Negative);
        assert_eq!(result.display, "$-5.00 (Invalid)");
        assert_eq!(result.issue.as_deref(), Some("Negative price"));
    }

    #[test]
    fn test_high_price() {
        let result = validate_price(&json!(1500));
        assert_eq!(result.severity, PriceSeverity::High);
        assert_eq!(result.display, "$1500.00");
        assert!(!result.display.contains("(Invalid)"));
        assert!(result.has_issue);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let result = validate_price(&json!(1000));
        assert_eq!(result.severity, PriceSeverity::Valid);
        assert_eq!(result.display, "$1000.00");
    }

    #[test]
    fn test_string_price_is_coerced() {
        let result = validate_price(&json!("12.5"));
        assert_eq!(result, PriceValidation::valid("$12.50"));
    }

    #[test]
    fn test_zero_price_is_valid() {
        let result = validate_price(&json!(0));
        assert_eq!(result.severity, PriceSeverity::Valid);
        assert_eq!(result.display, "$0.00");
    }
}
