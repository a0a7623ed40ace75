//! Add/edit form state machine.
//!
//! One form serves both creating and editing. [`FormState`] owns the mode,
//! the submission phase, the input text and the inline field errors.
//! Handlers take the outcome of a network call as a plain `Result` and
//! return the [`FormEffect`]s the page should apply.
//!
//! ```text
//!            begin_submit (fields valid)
//!     Idle ───────────────────────────────► Submitting
//!      ▲                                        │
//!      └──────────── settle_submit ◄────────────┘
//!                (success or failure)
//!
//!     Create ──begin_edit(found)──► Edit { original_name }
//!       ▲                                  │
//!       └──── cancel_edit / update ok ─────┘
//! ```

mod delete;

pub use delete::*;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::models::{FormFields, FormMode, Medicine, SubmitPhase};
use crate::notify::NotificationKind;
use crate::payload::FetchResult;
use crate::validation::{validate_fields, FieldErrors};

/// Something the page must do after a handler ran.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum FormEffect {
    /// Show a notification banner
    Notify {
        kind: NotificationKind,
        message: String,
    },
    /// Re-fetch and re-render the whole list
    RefreshList,
}

impl FormEffect {
    pub fn notify(kind: NotificationKind, message: impl Into<String>) -> Self {
        FormEffect::Notify {
            kind,
            message: message.into(),
        }
    }
}

/// Network call produced by a successful submit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SubmitRequest {
    /// `POST /create`
    Create { name: String, price: f64 },
    /// `POST /update`
    Update {
        original_name: String,
        name: String,
        price: f64,
    },
}

impl SubmitRequest {
    pub fn name(&self) -> &str {
        match self {
            SubmitRequest::Create { name, .. } | SubmitRequest::Update { name, .. } => name,
        }
    }

    pub fn price(&self) -> f64 {
        match self {
            SubmitRequest::Create { price, .. } | SubmitRequest::Update { price, .. } => *price,
        }
    }

    /// Notification text when the call fails without a server message.
    pub fn failure_fallback(&self) -> &'static str {
        match self {
            SubmitRequest::Create { .. } => "Failed to add medicine.",
            SubmitRequest::Update { .. } => "Failed to update medicine.",
        }
    }
}

/// Why a submit did not start.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    #[error("a submission is already in progress")]
    InFlight,

    #[error("invalid form input: {0}")]
    Invalid(FieldErrors),
}

/// State of the shared add/edit form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FormState {
    mode: FormMode,
    phase: SubmitPhase,
    fields: FormFields,
    field_errors: FieldErrors,
    cancel_visible: bool,
}

impl FormState {
    /// A fresh form in create mode.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Inline errors from the last rejected submit.
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Whether the "Cancel" affordance is shown.
    pub fn cancel_visible(&self) -> bool {
        self.cancel_visible
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.fields.name = name.into();
    }

    pub fn set_price(&mut self, price: impl Into<String>) {
        self.fields.price = price.into();
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.phase == SubmitPhase::Idle
    }

    pub fn submit_label(&self) -> &'static str {
        match (&self.phase, self.mode.is_edit()) {
            (SubmitPhase::Idle, false) => "Add Medicine",
            (SubmitPhase::Idle, true) => "Update Medicine",
            (SubmitPhase::Submitting, false) => "Adding Medicine...",
            (SubmitPhase::Submitting, true) => "Updating Medicine...",
        }
    }

    /// Validate the inputs and, if they pass, enter `Submitting`.
    ///
    /// On invalid input every failing field keeps its message in
    /// [`field_errors`](Self::field_errors) and the phase stays `Idle`.
    pub fn begin_submit(&mut self) -> Result<SubmitRequest, SubmitRejected> {
        if self.phase == SubmitPhase::Submitting {
            return Err(SubmitRejected::InFlight);
        }

        self.field_errors.clear();
        let input = match validate_fields(&self.fields) {
            Ok(input) => input,
            Err(errors) => {
                self.field_errors = errors.clone();
                return Err(SubmitRejected::Invalid(errors));
            }
        };

        self.phase = SubmitPhase::Submitting;

        Ok(match &self.mode {
            FormMode::Create => SubmitRequest::Create {
                name: input.name,
                price: input.price,
            },
            FormMode::Edit { original_name } => SubmitRequest::Update {
                original_name: original_name.clone(),
                name: input.name,
                price: input.price,
            },
        })
    }

    /// Apply the outcome of a create/update call. Always returns to `Idle`.
    ///
    /// Failures keep the inputs so the user can retry.
    pub fn settle_submit(
        &mut self,
        request: &SubmitRequest,
        outcome: FetchResult<Option<String>>,
    ) -> Vec<FormEffect> {
        self.phase = SubmitPhase::Idle;

        let message = match outcome {
            Ok(message) => message,
            Err(error) => {
                return vec![FormEffect::notify(
                    NotificationKind::Error,
                    error.mutation_message(request.failure_fallback()),
                )]
            }
        };

        match request {
            SubmitRequest::Create { .. } => {
                self.fields.clear();
                vec![
                    FormEffect::notify(
                        NotificationKind::Success,
                        message.unwrap_or_else(|| "Medicine added successfully".to_string()),
                    ),
                    FormEffect::RefreshList,
                ]
            }
            SubmitRequest::Update { .. } => {
                self.reset_to_create();
                vec![
                    FormEffect::notify(
                        NotificationKind::Success,
                        message.unwrap_or_else(|| "Medicine updated successfully".to_string()),
                    ),
                    FormEffect::RefreshList,
                ]
            }
        }
    }

    /// Bind the form to the first record whose name matches `name`.
    ///
    /// `entries` is a freshly fetched list. An exact name match wins, so a
    /// row's own key always binds its own record. Otherwise names match
    /// trimmed and case-insensitively, first in list order. When nothing
    /// matches the form is left untouched and no effect is returned.
    pub fn begin_edit(&mut self, entries: &[Value], name: &str) -> Vec<FormEffect> {
        let wanted = Medicine::match_key(name);
        if wanted.is_empty() {
            return Vec::new();
        }

        let medicines: Vec<Medicine> = entries.iter().filter_map(Medicine::from_value).collect();
        let Some(found) = medicines
            .iter()
            .find(|m| m.name == name)
            .or_else(|| {
                medicines
                    .iter()
                    .find(|m| Medicine::match_key(&m.name) == wanted)
            })
            .cloned()
        else {
            return Vec::new();
        };

        self.fields = FormFields::new(
            found.name.clone(),
            found.price.map(|p| p.to_string()).unwrap_or_default(),
        );
        self.field_errors.clear();
        self.mode = FormMode::Edit {
            original_name: found.name.clone(),
        };
        self.cancel_visible = true;

        vec![FormEffect::notify(
            NotificationKind::Info,
            format!("Editing {}. Update the fields and submit, or cancel.", found.name),
        )]
    }

    /// Leave edit mode without saving.
    pub fn cancel_edit(&mut self) -> Vec<FormEffect> {
        if !self.mode.is_edit() {
            return Vec::new();
        }
        self.reset_to_create();
        vec![FormEffect::notify(NotificationKind::Info, "Edit cancelled")]
    }

    fn reset_to_create(&mut self) {
        self.mode = FormMode::Create;
        self.fields.clear();
        self.field_errors.clear();
        self.cancel_visible = false;
    }
}
