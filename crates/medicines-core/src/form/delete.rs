//! Delete flow: confirm, request, settle.

use serde::{Deserialize, Serialize};

use super::{FormEffect, FormState};
use crate::notify::NotificationKind;
use crate::payload::FetchResult;

/// `DELETE /delete` for one medicine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteRequest {
    pub name: String,
}

impl DeleteRequest {
    /// Question put to the user before deleting.
    pub fn confirmation_prompt(name: &str) -> String {
        format!("Are you sure you want to delete {}?", name)
    }

    /// Build the request only when the user confirmed.
    pub fn confirmed(name: &str, confirmed: bool) -> Option<Self> {
        confirmed.then(|| Self {
            name: name.to_string(),
        })
    }
}

impl FormState {
    /// Apply the outcome of a delete call.
    ///
    /// Deleting the record that is being edited also leaves edit mode, since
    /// there is nothing left to update.
    pub fn settle_delete(
        &mut self,
        request: &DeleteRequest,
        outcome: FetchResult<Option<String>>,
    ) -> Vec<FormEffect> {
        match outcome {
            Ok(message) => {
                let editing_deleted = self.mode.original_name() == Some(request.name.as_str());
                if editing_deleted {
                    self.reset_to_create();
                }

                vec![
                    FormEffect::notify(
                        NotificationKind::Success,
                        message.unwrap_or_else(|| {
                            format!("{} deleted successfully", request.name)
                        }),
                    ),
                    FormEffect::RefreshList,
                ]
            }
            Err(error) => vec![FormEffect::notify(
                NotificationKind::Error,
                error.mutation_message("Failed to delete medicine."),
            )],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FormMode;
    use crate::payload::FetchError;
    use serde_json::json;

    #[test]
    fn test_declined_confirmation() {
        assert_eq!(DeleteRequest::confirmed("Aspirin", false), None);
        assert_eq!(
            DeleteRequest::confirmed("Aspirin", true),
            Some(DeleteRequest {
                name: "Aspirin".into()
            })
        );
    }

    #[test]
    fn test_prompt() {
        assert_eq!(
            DeleteRequest::confirmation_prompt("Aspirin"),
            "Are you sure you want to delete Aspirin?"
        );
    }

    #[test]
    fn test_delete_success_refreshes() {
        let mut state = FormState::new();
        let request = DeleteRequest {
            name: "Aspirin".into(),
        };
        let effects = state.settle_delete(&request, Ok(None));

        assert_eq!(
            effects,
            vec![
                FormEffect::notify(NotificationKind::Success, "Aspirin deleted successfully"),
                FormEffect::RefreshList
            ]
        );
    }

    #[test]
    fn test_delete_failure_notifies_only() {
        let mut state = FormState::new();
        let request = DeleteRequest {
            name: "Aspirin".into(),
        };
        let effects = state.settle_delete(&request, Err(FetchError::Server("Not found".into())));
        assert_eq!(
            effects,
            vec![FormEffect::notify(NotificationKind::Error, "Not found")]
        );
    }

    #[test]
    fn test_deleting_edited_record_leaves_edit_mode() {
        let mut state = FormState::new();
        state.begin_edit(&[json!({"name": "Aspirin", "price": 5})], "Aspirin");
        assert!(state.mode().is_edit());

        let request = DeleteRequest {
            name: "Aspirin".into(),
        };
        state.settle_delete(&request, Ok(None));
        assert_eq!(state.mode(), &FormMode::Create);
        assert!(!state.cancel_visible());
    }

    #[test]
    fn test_deleting_other_record_keeps_edit_mode() {
        let entries = [
            json!({"name": "Aspirin", "price": 5}),
            json!({"name": "Zinc", "price": 2}),
        ];
        let mut state = FormState::new();
        state.begin_edit(&entries, "Aspirin");

        let request = DeleteRequest { name: "Zinc".into() };
        state.settle_delete(&request, Ok(None));
        assert!(state.mode().is_edit());
    }

    #[test]
    fn test_deleting_case_variant_keeps_edit_mode() {
        let entries = [
            json!({"name": "Aspirin", "price": 5}),
            json!({"name": "aspirin", "price": 7}),
        ];
        let mut state = FormState::new();
        state.begin_edit(&entries, "Aspirin");
        state.set_price("6");

        let request = DeleteRequest {
            name: "aspirin".into(),
        };
        state.settle_delete(&request, Ok(None));

        assert_eq!(
            state.mode(),
            &FormMode::Edit {
                original_name: "Aspirin".into()
            }
        );
        assert_eq!(state.fields().price, "6");
    }
}
