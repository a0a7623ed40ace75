//! One page session.
//!
//! A [`Session`] owns everything the page shows: the list container, the
//! add/edit form, the notification slot and the average-price display.
//! Each user action runs to completion against the [`MedicineApi`] before
//! the next one starts, and every mutation ends by re-fetching the list.

use chrono::{DateTime, Utc};
use medicines_core::payload::AVERAGE_PRICE_FAILED;
use medicines_core::{
    render_medicines, DeleteRequest, FormEffect, FormState, ListView, Notification,
    NotificationCenter, NotificationKind, SubmitRejected, SubmitRequest,
};
use tracing::{debug, error, info};

use crate::api::MedicineApi;
use crate::config::ClientConfig;

/// Notification shown when the edit lookup cannot fetch the list.
pub const EDIT_LOAD_FAILED: &str = "Failed to load medicine data";

/// Page state bound to an API.
#[derive(Debug)]
pub struct Session<A> {
    api: A,
    form: FormState,
    notifications: NotificationCenter,
    list: ListView,
    average: Option<String>,
    confirm_deletes: bool,
}

impl<A: MedicineApi> Session<A> {
    pub fn new(api: A, config: &ClientConfig) -> Self {
        Self {
            api,
            form: FormState::new(),
            notifications: NotificationCenter::new(config.notification_ttl()),
            list: ListView::Loading,
            average: None,
            confirm_deletes: config.confirm_deletes,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn average(&self) -> Option<&str> {
        self.average.as_deref()
    }

    /// The notification slot, regardless of expiry.
    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    /// The notification still visible at `now`.
    pub fn visible_notification(&mut self, now: DateTime<Utc>) -> Option<&Notification> {
        self.notifications.visible_at(now)
    }

    pub fn dismiss_notification(&mut self) -> bool {
        match self.notifications.current().map(|n| n.id) {
            Some(id) => self.notifications.dismiss(id),
            None => false,
        }
    }

    /// Fetch and render the list.
    pub fn refresh(&mut self) -> &ListView {
        self.list = match self.api.list_medicines() {
            Ok(entries) => {
                debug!(entries = entries.len(), "medicines loaded");
                ListView::Loaded(render_medicines(&entries))
            }
            Err(err) => {
                error!(error = %err, "failed to load medicines");
                ListView::Failed {
                    message: err.list_message(),
                    retry: err.offers_retry(),
                }
            }
        };
        &self.list
    }

    /// Re-run the list fetch after a failure.
    pub fn retry(&mut self) -> &ListView {
        self.refresh()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.form.set_name(name);
    }

    pub fn set_price(&mut self, price: impl Into<String>) {
        self.form.set_price(price);
    }

    /// Submit the form: create in create mode, update in edit mode.
    ///
    /// Validation failures leave the field errors on the form and return
    /// `Err`. Server and transport failures become an error notification.
    pub fn submit(&mut self) -> Result<(), SubmitRejected> {
        let request = self.form.begin_submit().inspect_err(|rejected| {
            debug!(reason = %rejected, "submit rejected");
        })?;

        info!(
            name = request.name(),
            price = request.price(),
            editing = matches!(request, SubmitRequest::Update { .. }),
            "submitting medicine"
        );
        let outcome = match &request {
            SubmitRequest::Create { name, price } => self.api.create_medicine(name, *price),
            SubmitRequest::Update {
                original_name,
                name,
                price,
            } => self.api.update_medicine(original_name, name, *price),
        };

        match &outcome {
            Ok(_) => info!(name = request.name(), "medicine saved"),
            Err(err) => error!(error = %err, name = request.name(), "failed to save medicine"),
        }

        let effects = self.form.settle_submit(&request, outcome);
        self.apply_effects(effects);
        Ok(())
    }

    /// Switch the form to editing `name`. Returns whether a record matched.
    pub fn edit(&mut self, name: &str) -> bool {
        let entries = match self.api.list_medicines() {
            Ok(entries) => entries,
            Err(err) => {
                error!(error = %err, name, "failed to load medicine for editing");
                self.notifications
                    .show(NotificationKind::Error, EDIT_LOAD_FAILED);
                return false;
            }
        };

        let effects = self.form.begin_edit(&entries, name);
        let matched = !effects.is_empty();
        if !matched {
            debug!(name, "no medicine to edit");
        }
        self.apply_effects(effects);
        matched
    }

    /// Leave edit mode without saving.
    pub fn cancel(&mut self) {
        let effects = self.form.cancel_edit();
        self.apply_effects(effects);
    }

    /// Delete `name` after `confirm` approves the prompt.
    ///
    /// `confirm` is not consulted when deletes need no confirmation.
    /// Returns whether a delete request was sent.
    pub fn delete<F>(&mut self, name: &str, confirm: F) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        let confirmed =
            !self.confirm_deletes || confirm(&DeleteRequest::confirmation_prompt(name));
        let Some(request) = DeleteRequest::confirmed(name, confirmed) else {
            debug!(name, "delete declined");
            return false;
        };

        info!(name, "deleting medicine");
        let outcome = self.api.delete_medicine(&request.name);
        if let Err(err) = &outcome {
            error!(error = %err, name, "failed to delete medicine");
        }

        let effects = self.form.settle_delete(&request, outcome);
        self.apply_effects(effects);
        true
    }

    /// Fetch the average price into the display.
    pub fn fetch_average(&mut self) -> &str {
        let text = match self.api.average_price() {
            Ok(response) => response.display_text(),
            Err(err) => {
                error!(error = %err, "failed to fetch average price");
                AVERAGE_PRICE_FAILED.to_string()
            }
        };
        self.average.insert(text).as_str()
    }

    fn apply_effects(&mut self, effects: Vec<FormEffect>) {
        for effect in effects {
            match effect {
                FormEffect::Notify { kind, message } => {
                    self.notifications.show(kind, message);
                }
                FormEffect::RefreshList => {
                    self.refresh();
                }
            }
        }
    }

    /// Terminal rendering of the whole page at `now`.
    pub fn page_text(&mut self, now: DateTime<Utc>) -> String {
        let mut text = self.list.to_text();

        if let Some(average) = &self.average {
            text.push_str(&format!("\n{}\n", average));
        }

        text.push('\n');
        text.push_str(&form_text(&self.form));

        if let Some(notification) = self.notifications.visible_at(now) {
            text.push_str(&format!("\n{}\n", notification));
        }
        text
    }
}

fn form_text(form: &FormState) -> String {
    let fields = form.fields();
    let label = if form.is_submit_enabled() {
        form.submit_label().to_string()
    } else {
        format!("{} (disabled)", form.submit_label())
    };
    let mut text = format!(
        "[{}] name: {:?}  price: {:?}\n",
        label,
        fields.name,
        fields.price
    );
    if let Some(original) = form.mode().original_name() {
        text.push_str(&format!("Editing {} (type `cancel` to stop)\n", original));
    }
    for field_error in form.field_errors().iter() {
        text.push_str(&format!("  {}: {}\n", field_error.field, field_error.message));
    }
    text
}
