//! Form-specific error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A field name that the registry does not declare. Integration bug,
    /// never user-recoverable.
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("'{value}' is not an option of {field}")]
    InvalidOption { field: &'static str, value: String },

    #[error("{0} is read-only and only set by the date picker")]
    ReadOnly(&'static str),
}

pub type FormResult<T> = Result<T, FormError>;
