//! Derived counters shown under the description and recipient fields.

use crate::validate::email;

use super::registry::{ADDITIONAL_INFO, INFO_MAX_LENGTH, RECIPIENT_EMAIL};
use super::state::FormState;

/// Always computed from a `FormState`, never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counters {
    /// Characters in the description.
    pub info_length: usize,
    /// Non-empty trimmed comma segments in the recipient list.
    pub email_count: usize,
}

impl Counters {
    pub fn from_state(state: &FormState) -> Self {
        Self {
            info_length: state.value(ADDITIONAL_INFO).chars().count(),
            email_count: email::segments(state.value(RECIPIENT_EMAIL)).count(),
        }
    }

    /// "n / 400"
    pub fn info_label(&self) -> String {
        format!("{} / {INFO_MAX_LENGTH}", self.info_length)
    }

    /// "1 email entered", "3 emails entered"
    pub fn email_label(&self) -> String {
        let n = self.email_count;
        format!("{n} email{} entered", if n == 1 { "" } else { "s" })
    }
}
