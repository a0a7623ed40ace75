//! Medicine records served by the inventory API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::parse_float;

/// A single medicine in the inventory.
///
/// The server owns these records. The client has no identity for them
/// beyond `name`, which it uses as the key for edit and delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medicine {
    /// Medicine name (de-facto key)
    pub name: String,
    /// Unit price, `None` when the server has no price
    pub price: Option<f64>,
}

impl Medicine {
    /// Create a new medicine.
    pub fn new(name: impl Into<String>, price: Option<f64>) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Read a raw list entry leniently.
    ///
    /// Returns `None` for entries that are not JSON objects. A non-string
    /// name reads as empty; string prices are coerced the same way the
    /// price validator coerces them.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let name = object
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let price = match object.get("price") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => parse_float(s),
            _ => None,
        };
        Some(Self { name, price })
    }

    /// Name comparison key: trimmed and lowercased.
    ///
    /// Duplicate detection and edit lookup both match on this key.
    pub fn match_key(name: &str) -> String {
        name.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_object() {
        let m = Medicine::from_value(&json!({"name": "Aspirin", "price": 5})).unwrap();
        assert_eq!(m.name, "Aspirin");
        assert_eq!(m.price, Some(5.0));
    }

    #[test]
    fn test_from_value_string_price() {
        let m = Medicine::from_value(&json!({"name": "Ibuprofen", "price": "12.5"})).unwrap();
        assert_eq!(m.price, Some(12.5));
    }

    #[test]
    fn test_from_value_lenient_fields() {
        let m = Medicine::from_value(&json!({"name": 42, "price": null})).unwrap();
        assert_eq!(m.name, "");
        assert_eq!(m.price, None);
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(Medicine::from_value(&json!("Aspirin")).is_none());
        assert!(Medicine::from_value(&json!(null)).is_none());
        assert!(Medicine::from_value(&json!([1, 2])).is_none());
    }

    #[test]
    fn test_match_key() {
        assert_eq!(Medicine::match_key("  AsPirin "), "aspirin");
    }
}
