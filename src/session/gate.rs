//! Submission gate — the recipient check that runs before a circular leaves.
//!
//! Required-field completeness is not checked here; the
//! presentation layer enforces it from `FieldDefinition::required` (see
//! `FormState::missing_required`). This gate only decides whether the
//! recipient list is fit to send.

use crate::form::registry::RECIPIENT_EMAIL;
use crate::form::FormSnapshot;
use crate::validate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Forward this snapshot, unchanged, to the endpoint.
    Accepted(FormSnapshot),
    /// Do not forward; show these entries to the user.
    Rejected(Vec<String>),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

pub fn try_submit(snapshot: FormSnapshot) -> SubmitOutcome {
    let verdict = validate::validate(snapshot.value(RECIPIENT_EMAIL));
    if verdict.valid {
        SubmitOutcome::Accepted(snapshot)
    } else {
        SubmitOutcome::Rejected(verdict.invalid_entries)
    }
}
