//! Form state values.

use serde::{Deserialize, Serialize};

/// Which operation the shared form is bound to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum FormMode {
    /// Submitting creates a new medicine
    #[default]
    Create,
    /// Submitting updates the medicine currently named `original_name`
    Edit { original_name: String },
}

impl FormMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit { .. })
    }

    /// Name of the record being edited, if any.
    pub fn original_name(&self) -> Option<&str> {
        match self {
            FormMode::Create => None,
            FormMode::Edit { original_name } => Some(original_name),
        }
    }
}

/// Submission lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    /// A create/update request is in flight
    Submitting,
}

/// Raw text currently in the form's two inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FormFields {
    pub name: String,
    pub price: String,
}

impl FormFields {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.price.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.price.is_empty()
    }
}
