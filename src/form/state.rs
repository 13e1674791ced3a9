//! The live record of every field value.
//!
//! Exactly one value per declared field, empty until set. The only mutation
//! is `set_field`; readers that must not observe later edits take a
//! `FormSnapshot`.

use std::collections::HashMap;
use std::ops::Deref;

use super::error::FormResult;
use super::registry::{self, fields};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    values: HashMap<&'static str, String>,
}

impl FormState {
    /// A fresh record with every declared field empty.
    pub fn new() -> Self {
        Self {
            values: fields().iter().map(|f| (f.name, String::new())).collect(),
        }
    }

    /// Replace the value of a declared field.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> FormResult<()> {
        let def = registry::require_field(name)?;
        let value = value.into();
        tracing::debug!(field = def.name, len = value.len(), "field updated");
        self.values.insert(def.name, value);
        Ok(())
    }

    /// Current value of a declared field.
    pub fn get_field(&self, name: &str) -> FormResult<&str> {
        let def = registry::require_field(name)?;
        Ok(self.value(def.name))
    }

    /// Value lookup for names already known to be declared.
    pub(crate) fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or_default()
    }

    /// Immutable copy for preview rendering and submission.
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            state: self.clone(),
        }
    }

    /// Required fields that are still empty (after trimming), in display order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        fields()
            .iter()
            .filter(|f| f.required && self.value(f.name).trim().is_empty())
            .map(|f| f.name)
            .collect()
    }

    /// Every declared field as `(name, value)`, in display order.
    pub fn to_form_pairs(&self) -> Vec<(&'static str, String)> {
        fields()
            .iter()
            .map(|f| (f.name, self.value(f.name).to_string()))
            .collect()
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

/// A frozen copy of a `FormState`. Derefs to the read-only API only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    state: FormState,
}

impl Deref for FormSnapshot {
    type Target = FormState;

    fn deref(&self) -> &FormState {
        &self.state
    }
}
