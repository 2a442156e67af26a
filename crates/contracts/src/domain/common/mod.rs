//! Helpers shared by every record type read from the row store

pub mod validation;
pub mod wire;

pub use validation::{DraftField, ValidationError};
