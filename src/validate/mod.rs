//! Data-quality checks run before a circular may be submitted.

pub mod email;

pub use email::{validate, ValidationResult};
