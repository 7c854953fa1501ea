//! Validation modules

pub mod document;

pub use document::{DocumentValidator, ValidationError};
