//! Medicines Core Library
//!
//! Client-side logic for the medicines inventory: record validation, list
//! rendering with data-quality annotations, and the single-form state
//! machine that switches between adding and editing a medicine.
//!
//! # Architecture
//!
//! ```text
//! GET /medicines ──► parse_list_payload ──► render_medicines ──► ListView
//!                                              │
//!                               validate_name / validate_price
//!                                              │
//!                                    duplicate detection
//!
//! FormFields ──► validate_fields ──► FormState::begin_submit ──► SubmitRequest
//!                                                                    │
//!                                                         (transport elsewhere)
//!                                                                    │
//!                          FormEffect ◄── FormState::settle_submit ◄─┘
//! ```
//!
//! Nothing here performs I/O. Network outcomes come in as
//! `Result<_, FetchError>` values and the state machine answers with
//! [`FormEffect`]s (notifications, list refreshes) for the caller to apply.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Medicine, validation results, form state values)
//! - [`validation`]: Record validators and form field validation
//! - [`render`]: List rendering, quality summary, HTML/text output
//! - [`form`]: Create/edit/delete/cancel state machine
//! - [`notify`]: Single-slot auto-dismissing notifications
//! - [`payload`]: Wire payload parsing and the fetch error taxonomy

pub mod form;
pub mod models;
pub mod notify;
pub mod payload;
pub mod render;
pub mod validation;

// Re-export commonly used types
pub use form::{DeleteRequest, FormEffect, FormState, SubmitRejected, SubmitRequest};
pub use models::{
    FormFields, FormMode, Medicine, NameValidation, PriceSeverity, PriceValidation, SubmitPhase,
};
pub use notify::{Notification, NotificationCenter, NotificationKind};
pub use payload::{parse_list_payload, AveragePriceResponse, FetchError, MutationResponse};
pub use render::{render_medicines, ListView, MedicineRow, QualitySummary, RenderedList};
pub use validation::{validate_fields, validate_name, validate_price, FieldErrors, FormField};
