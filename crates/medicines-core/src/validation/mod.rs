//! Validation for list records and form input.
//!
//! - [`validate_name`] / [`validate_price`] classify records from the server
//!   for display. They never reject; they annotate.
//! - [`validate_fields`] gates form submission and reports per-field messages.

mod fields;
mod number;
mod record;

pub use fields::*;
pub use number::*;
pub use record::*;
