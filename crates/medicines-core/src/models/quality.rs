//! Data-quality annotations derived from raw records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display value for records without a usable name.
pub const UNKNOWN_MEDICINE: &str = "Unknown Medicine";

/// Issue appended when a name repeats within one list.
pub const DUPLICATE_NAME_ISSUE: &str = "Duplicate name";

/// Result of validating a record's name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NameValidation {
    /// Name to display
    pub value: String,
    /// Whether validation flagged the name
    pub has_issue: bool,
    /// Human-readable issue(s), comma-joined
    pub issue: Option<String>,
}

impl NameValidation {
    pub fn valid(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            has_issue: false,
            issue: None,
        }
    }

    pub fn invalid(value: impl Into<String>, issue: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            has_issue: true,
            issue: Some(issue.into()),
        }
    }

    /// True when the display value is the missing-name placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.value == UNKNOWN_MEDICINE
    }

    /// Mark this name as shared with another record in the same list.
    pub fn flag_duplicate(&mut self) {
        self.has_issue = true;
        self.issue = Some(match self.issue.take() {
            Some(existing) => format!("{}, {}", existing, DUPLICATE_NAME_ISSUE),
            None => DUPLICATE_NAME_ISSUE.to_string(),
        });
    }
}

/// Severity class of a price.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PriceSeverity {
    /// Null or absent
    Missing,
    /// Not a number
    Invalid,
    /// Below zero
    Negative,
    /// Above the plausibility ceiling
    High,
    Valid,
}

impl PriceSeverity {
    /// CSS class used by the list markup.
    pub fn css_class(&self) -> &'static str {
        match self {
            PriceSeverity::Missing => "price-missing",
            PriceSeverity::Invalid => "price-invalid",
            PriceSeverity::Negative => "price-negative",
            PriceSeverity::High => "price-high",
            PriceSeverity::Valid => "price-valid",
        }
    }
}

impl fmt::Display for PriceSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PriceSeverity::Missing => "missing",
            PriceSeverity::Invalid => "invalid",
            PriceSeverity::Negative => "negative",
            PriceSeverity::High => "high",
            PriceSeverity::Valid => "valid",
        };
        f.write_str(label)
    }
}

/// Result of validating a record's price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceValidation {
    /// Price text to display (currency-prefixed when numeric)
    pub display: String,
    /// Whether validation flagged the price
    pub has_issue: bool,
    /// Human-readable issue
    pub issue: Option<String>,
    pub severity: PriceSeverity,
}

impl PriceValidation {
    pub fn flagged(display: impl Into<String>, issue: &str, severity: PriceSeverity) -> Self {
        Self {
            display: display.into(),
            has_issue: true,
            issue: Some(issue.to_string()),
            severity,
        }
    }

    pub fn valid(display: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            has_issue: false,
            issue: None,
            severity: PriceSeverity::Valid,
        }
    }
}
