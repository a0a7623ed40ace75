//! Domain models for the medicines client.

mod form;
mod medicine;
mod quality;

pub use form::*;
pub use medicine::*;
pub use quality::*;
