//! Synchronous validation of the add/edit form inputs.
//!
//! Every invalid field gets its own message; checks do not stop at the
//! first failure.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::number::parse_float;
use super::record::MIN_NAME_CHARS;
use crate::models::FormFields;

/// Largest price the form accepts.
pub const MAX_FORM_PRICE: f64 = 10_000.0;

/// Form inputs that can carry an error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Price,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::Name => f.write_str("name"),
            FormField::Price => f.write_str("price"),
        }
    }
}

/// An inline message attached to one field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

/// All field errors from one validation pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a message to a field, replacing any earlier one.
    pub fn push(&mut self, field: FormField, message: impl Into<String>) {
        self.0.retain(|e| e.field != field);
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for one field, if it failed.
    pub fn message_for(&self, field: FormField) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Form input that passed validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidatedInput {
    /// Trimmed name
    pub name: String,
    pub price: f64,
}

/// Validate the form's name and price inputs.
pub fn validate_fields(fields: &FormFields) -> Result<ValidatedInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = fields.name.trim();
    if name.is_empty() {
        errors.push(FormField::Name, "Medicine name is required");
    } else if name.chars().count() < MIN_NAME_CHARS {
        errors.push(
            FormField::Name,
            "Medicine name must be at least 2 characters",
        );
    }

    let price = parse_float(&fields.price);
    match price {
        None => errors.push(FormField::Price, "Please enter a valid number"),
        Some(p) if p <= 0.0 => errors.push(FormField::Price, "Price must be greater than $0"),
        Some(p) if p > MAX_FORM_PRICE => errors.push(
            FormField::Price,
            "Price seems unreasonably high (over $10,000)",
        ),
        Some(_) => {}
    }

    match price {
        Some(price) if errors.is_empty() => Ok(ValidatedInput {
            name: name.to_string(),
            price,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input() {
        let input = validate_fields(&FormFields::new("  Aspirin ", "5.25")).unwrap();
        assert_eq!(input.name, "Aspirin");
        assert_eq!(input.price, 5.25);
    }

    #[test]
    fn test_name_required() {
        let errors = validate_fields(&FormFields::new("   ", "5")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.message_for(FormField::Name),
            Some("Medicine name is required")
        );
    }

    #[test]
    fn test_name_too_short() {
        let errors = validate_fields(&FormFields::new("A", "5")).unwrap_err();
        assert_eq!(
            errors.message_for(FormField::Name),
            Some("Medicine name must be at least 2 characters")
        );
        assert_eq!(errors.message_for(FormField::Price), None);
    }

    #[test]
    fn test_price_only_error() {
        let errors = validate_fields(&FormFields::new("Aspirin", "-1")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.message_for(FormField::Price),
            Some("Price must be greater than $0")
        );
    }

    #[test]
    fn test_price_rules() {
        let cases = [
            ("abc", "Please enter a valid number"),
            ("", "Please enter a valid number"),
            ("0", "Price must be greater than $0"),
            ("10000.01", "Price seems unreasonably high (over $10,000)"),
        ];
        for (price, expected) in cases {
            let errors = validate_fields(&FormFields::new("Aspirin", price)).unwrap_err();
            assert_eq!(errors.message_for(FormField::Price), Some(expected), "{}", price);
        }
    }

    #[test]
    fn test_price_ceiling_inclusive() {
        assert!(validate_fields(&FormFields::new("Aspirin", "10000")).is_ok());
    }

    #[test]
    fn test_all_errors_collected() {
        let errors = validate_fields(&FormFields::new("", "abc")).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.message_for(FormField::Name).is_some());
        assert!(errors.message_for(FormField::Price).is_some());
        assert_eq!(
            errors.to_string(),
            "name: Medicine name is required; price: Please enter a valid number"
        );
    }
}
