//! FormSession — one user's in-memory form, and the controllers around it.
//!
//! Display layers drive the form only through this type. Every mutation
//! returns the counters computed after it, so a caller never sees a new
//! value paired with stale counts.
//!
//! Submission is two-phase: `begin_submit` validates and, when accepted,
//! raises the in-flight guard; `finish_submit` lowers it once the endpoint
//! answers. A second `begin_submit` while the guard is raised fails.

pub mod gate;
pub mod modal;
pub mod theme;

use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::form::registry::DATE;
use crate::form::{Counters, FormResult, FormSnapshot, FormState};
use crate::preview::{self, PreviewDocument};
use crate::submit::{SubmitError, SubmitReceipt};

pub use gate::SubmitOutcome;
pub use modal::ModalController;
pub use theme::{ThemeController, UiMode};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("a submission is already in progress")]
    SubmissionInFlight,
}

/// Resubmission guard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    InFlight,
}

#[derive(Debug)]
pub struct FormSession {
    id: Uuid,
    state: FormState,
    theme: ThemeController,
    modal: ModalController,
    phase: SubmitPhase,
}

impl FormSession {
    pub fn new(mode: UiMode) -> Self {
        let id = Uuid::new_v4();
        debug!(session = %id, "form session started");
        Self {
            id,
            state: FormState::new(),
            theme: ThemeController::new(mode),
            modal: ModalController::default(),
            phase: SubmitPhase::Idle,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.state.snapshot()
    }

    /// Set a field and return the counters as they stand afterwards.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> FormResult<Counters> {
        self.state.set_field(name, value)?;
        Ok(self.counters())
    }

    /// Date-picker notification: the picker's formatted date becomes the
    /// date of issue.
    pub fn on_date_selected(&mut self, formatted: &str) -> FormResult<()> {
        self.state.set_field(DATE, formatted)
    }

    pub fn counters(&self) -> Counters {
        Counters::from_state(&self.state)
    }

    pub fn email_counter_label(&self) -> String {
        self.counters().email_label()
    }

    pub fn info_counter_label(&self) -> String {
        self.counters().info_label()
    }

    pub fn missing_required(&self) -> Vec<&'static str> {
        self.state.missing_required()
    }

    pub fn theme(&self) -> &ThemeController {
        &self.theme
    }

    pub fn toggle_theme(&mut self) -> UiMode {
        self.theme.toggle()
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    /// Render the current values and show them in the preview modal.
    pub fn open_preview(&mut self) -> PreviewDocument {
        let doc = preview::render(&self.state.snapshot());
        self.modal.open(doc.clone());
        doc
    }

    pub fn close_preview(&mut self) {
        self.modal.close();
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::InFlight
    }

    /// Validate and, if accepted, mark a submission as in flight.
    ///
    /// The caller forwards an `Accepted` snapshot to the endpoint and must
    /// call `finish_submit` when it answers. `Rejected` leaves the guard
    /// down so the user can fix the recipients and retry.
    pub fn begin_submit(&mut self) -> Result<SubmitOutcome, SessionError> {
        if self.is_submitting() {
            warn!(session = %self.id, "submit ignored, previous submission still pending");
            return Err(SessionError::SubmissionInFlight);
        }
        let outcome = gate::try_submit(self.state.snapshot());
        match &outcome {
            SubmitOutcome::Accepted(_) => {
                self.phase = SubmitPhase::InFlight;
                info!(session = %self.id, "submission dispatched");
            }
            SubmitOutcome::Rejected(entries) => {
                warn!(session = %self.id, invalid = entries.len(), "submission blocked by invalid recipients");
            }
        }
        Ok(outcome)
    }

    /// Lower the in-flight guard. The endpoint's answer is only logged.
    pub fn finish_submit(&mut self, result: &Result<SubmitReceipt, SubmitError>) {
        self.phase = SubmitPhase::Idle;
        match result {
            Ok(receipt) => info!(session = %self.id, status = receipt.status, "submission accepted by endpoint"),
            Err(e) => warn!(session = %self.id, "submission failed: {e}"),
        }
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new(UiMode::default())
    }
}
