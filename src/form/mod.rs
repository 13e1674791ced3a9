//! The circular form: field registry, mutable state and derived counters.

pub mod counters;
pub mod error;
pub mod registry;
pub mod state;

pub use counters::Counters;
pub use error::{FormError, FormResult};
pub use registry::{field, fields, FieldDefinition, FieldKind};
pub use state::{FormSnapshot, FormState};
