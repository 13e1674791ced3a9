//! FormApp — the TEA model.
//!
//! All state lives here. Update receives AppMessages, mutates state.
//! View reads state to produce ratatui widgets. No side effects in view.
//!
//! This is the presentation layer for the form: it enforces the input
//! boundary (capacity, select options, read-only date) and required-field
//! completeness before asking the session to submit.

use chrono::NaiveDate;

use crate::form::registry::{fields, FieldDefinition, FieldKind, RECIPIENT_EMAIL};
use crate::form::FormSnapshot;
use crate::session::{FormSession, SessionError, SubmitOutcome, UiMode};
use crate::submit::{SubmitError, SubmitReceipt};

use super::date_picker::DatePicker;
use super::event::AppMessage;

/// What the status bar shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Ready,
    Info(String),
    Error(String),
}

/// The main TUI application state (TEA model).
pub struct FormApp {
    /// The form session behind every widget.
    pub session: FormSession,
    /// Index into the registry of the focused field.
    pub focus: usize,
    /// Whether the app should quit.
    pub should_quit: bool,
    pub status: StatusLine,
    /// Recipients the last submit attempt rejected (shown under the field).
    pub invalid_emails: Vec<String>,
    /// Accepted snapshot awaiting dispatch (set by update, consumed by runner).
    pub pending_submit: Option<FormSnapshot>,
    pub date_picker: DatePicker,
    /// Where submissions go, for the status bar.
    pub endpoint: String,
}

impl FormApp {
    pub fn new(mode: UiMode) -> Self {
        Self::with_picker(mode, DatePicker::today())
    }

    /// Fixed "today" for the date picker.
    pub fn with_today(mode: UiMode, today: NaiveDate) -> Self {
        Self::with_picker(mode, DatePicker::new(today))
    }

    fn with_picker(mode: UiMode, date_picker: DatePicker) -> Self {
        Self {
            session: FormSession::new(mode),
            focus: 0,
            should_quit: false,
            status: StatusLine::Ready,
            invalid_emails: Vec::new(),
            pending_submit: None,
            date_picker,
            endpoint: String::new(),
        }
    }

    /// Handle an AppMessage (TEA update).
    pub fn update(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Input(key) => super::input::handle_key(self, key),
            AppMessage::SubmitFinished(result) => self.finish_submit(result),
            AppMessage::Quit => self.should_quit = true,
        }
    }

    pub fn focused_field(&self) -> &'static FieldDefinition {
        &fields()[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % fields().len();
    }

    pub fn focus_prev(&mut self) {
        let n = fields().len();
        self.focus = (self.focus + n - 1) % n;
    }

    /// Current value of a registry field.
    pub fn value_of(&self, def: &FieldDefinition) -> &str {
        self.session.state().get_field(def.name).unwrap_or_default()
    }

    fn write_field(&mut self, def: &'static FieldDefinition, value: String) {
        if let Err(e) = self.session.set_field(def.name, value) {
            tracing::error!("field write rejected: {e}");
            self.status = StatusLine::Error(e.to_string());
            return;
        }
        if def.name == RECIPIENT_EMAIL {
            self.invalid_emails.clear();
        }
    }

    /// Append a typed character to the focused text field, up to capacity.
    pub fn type_char(&mut self, c: char) {
        let def = self.focused_field();
        if !matches!(def.kind, FieldKind::Text | FieldKind::TextArea) {
            return;
        }
        let mut value = self.value_of(def).to_string();
        value.push(c);
        let value = def.clamp_input(&value);
        self.write_field(def, value);
    }

    pub fn backspace(&mut self) {
        let def = self.focused_field();
        if !matches!(def.kind, FieldKind::Text | FieldKind::TextArea) {
            return;
        }
        let mut value = self.value_of(def).to_string();
        if value.pop().is_some() {
            self.write_field(def, value);
        }
    }

    /// Empty the focused field (select goes back to unselected).
    pub fn clear_field(&mut self) {
        let def = self.focused_field();
        if def.kind == FieldKind::DateReadOnly {
            return;
        }
        self.write_field(def, String::new());
    }

    pub fn cycle_select(&mut self, forward: bool) {
        let def = self.focused_field();
        if let Some(next) = def.cycle_option(self.value_of(def), forward) {
            self.write_field(def, next.to_string());
        }
    }

    /// Move the picker by days and publish the new date.
    pub fn shift_date(&mut self, days: i64) {
        self.date_picker.shift_days(days);
        self.publish_date();
    }

    pub fn shift_month(&mut self, months: i32) {
        self.date_picker.shift_months(months);
        self.publish_date();
    }

    pub fn pick_today(&mut self) {
        self.date_picker.reset_to_today();
        self.publish_date();
    }

    /// Publish the picker's current date as the date of issue.
    pub fn publish_date(&mut self) {
        let formatted = self.date_picker.formatted();
        if let Err(e) = self.session.on_date_selected(&formatted) {
            tracing::error!("date update rejected: {e}");
        }
    }

    pub fn open_preview(&mut self) {
        self.session.open_preview();
    }

    pub fn close_preview(&mut self) {
        self.session.close_preview();
    }

    pub fn toggle_theme(&mut self) {
        let mode = self.session.toggle_theme();
        self.status = StatusLine::Info(format!("{mode:?} mode"));
    }

    /// Check required fields, then ask the session's gate.
    pub fn request_submit(&mut self) {
        let missing = self.session.missing_required();
        if !missing.is_empty() {
            let labels: Vec<_> = fields()
                .iter()
                .filter(|f| missing.contains(&f.name))
                .map(|f| f.label)
                .collect();
            self.status = StatusLine::Error(format!("Please fill in: {}", labels.join(", ")));
            if let Some(first) = fields().iter().position(|f| f.name == missing[0]) {
                self.focus = first;
            }
            return;
        }

        match self.session.begin_submit() {
            Err(SessionError::SubmissionInFlight) => {
                self.status = StatusLine::Info("Submission already in progress".into());
            }
            Ok(SubmitOutcome::Rejected(entries)) => {
                self.status = StatusLine::Error(format!("Invalid email(s): {}", entries.join(", ")));
                self.invalid_emails = entries;
            }
            Ok(SubmitOutcome::Accepted(snapshot)) => {
                self.invalid_emails.clear();
                self.pending_submit = Some(snapshot);
                self.status = StatusLine::Info("Generating circular…".into());
            }
        }
    }

    fn finish_submit(&mut self, result: Result<SubmitReceipt, SubmitError>) {
        self.session.finish_submit(&result);
        self.status = match result {
            Ok(receipt) => StatusLine::Info(format!("Circular submitted (HTTP {})", receipt.status)),
            Err(e) => StatusLine::Error(format!("Submission failed: {e}")),
        };
    }
}

impl Default for FormApp {
    fn default() -> Self {
        Self::new(UiMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::registry::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn app() -> FormApp {
        FormApp::with_today(UiMode::Light, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap())
    }

    fn focus_on(app: &mut FormApp, name: &str) {
        app.focus = fields().iter().position(|f| f.name == name).unwrap();
    }

    fn type_str(app: &mut FormApp, s: &str) {
        for c in s.chars() {
            app.type_char(c);
        }
    }

    fn fill_required(app: &mut FormApp) {
        for (name, value) in [
            (SUBJECT, "Blood donation camp"),
            (AGENDA, "Voluntary donation"),
            (AUDIENCE, "All students"),
            (VENUE, "Health centre"),
            (EVENT_DATETIME, "21-03-2025 10:00"),
        ] {
            focus_on(app, name);
            type_str(app, value);
        }
        focus_on(app, DEPARTMENT);
        app.cycle_select(true);
        focus_on(app, URGENCY);
        app.cycle_select(true);
        app.pick_today();
    }

    #[test]
    fn app_default_state() {
        let app = app();
        assert_eq!(app.focus, 0);
        assert!(!app.should_quit);
        assert_eq!(app.status, StatusLine::Ready);
        assert!(app.pending_submit.is_none());
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut app = app();
        app.focus_prev();
        assert_eq!(app.focused_field().name, DATE);
        app.focus_next();
        assert_eq!(app.focused_field().name, SUBJECT);
    }

    #[test]
    fn typing_updates_value_and_counters_together() {
        let mut app = app();
        focus_on(&mut app, RECIPIENT_EMAIL);
        type_str(&mut app, "a@b.com, c@d.org");
        assert_eq!(app.session.counters().email_count, 2);
        app.backspace();
        assert_eq!(app.value_of(app.focused_field()), "a@b.com, c@d.or");
    }

    #[test]
    fn description_stops_at_capacity() {
        let mut app = app();
        focus_on(&mut app, ADDITIONAL_INFO);
        type_str(&mut app, &"z".repeat(INFO_MAX_LENGTH + 5));
        assert_eq!(app.session.counters().info_length, INFO_MAX_LENGTH);
    }

    #[test]
    fn typing_into_select_or_date_is_ignored() {
        let mut app = app();
        focus_on(&mut app, URGENCY);
        app.type_char('x');
        assert_eq!(app.value_of(app.focused_field()), "");
        focus_on(&mut app, DATE);
        app.type_char('1');
        app.clear_field();
        assert_eq!(app.value_of(app.focused_field()), "");
    }

    #[test]
    fn date_picker_publishes_formatted_date() {
        let mut app = app();
        app.pick_today();
        assert_eq!(app.session.state().get_field(DATE).unwrap(), "14-03-2025");
        app.shift_date(1);
        assert_eq!(app.session.state().get_field(DATE).unwrap(), "15-03-2025");
        app.shift_month(-1);
        assert_eq!(app.session.state().get_field(DATE).unwrap(), "15-02-2025");
    }

    #[test]
    fn submit_with_missing_fields_focuses_first_gap() {
        let mut app = app();
        focus_on(&mut app, VENUE);
        app.request_submit();
        assert!(matches!(app.status, StatusLine::Error(ref m) if m.starts_with("Please fill in: Subject")));
        assert_eq!(app.focused_field().name, SUBJECT);
        assert!(app.pending_submit.is_none());
    }

    #[test]
    fn submit_with_bad_email_reports_entries() {
        let mut app = app();
        fill_required(&mut app);
        focus_on(&mut app, RECIPIENT_EMAIL);
        type_str(&mut app, "good@x.in, nope");
        app.request_submit();
        assert_eq!(app.invalid_emails, vec!["nope"]);
        assert!(app.pending_submit.is_none());
        assert!(!app.session.is_submitting());

        // Editing the recipients clears the stale report.
        app.backspace();
        assert!(app.invalid_emails.is_empty());
    }

    #[test]
    fn accepted_submit_queues_snapshot_and_guards() {
        let mut app = app();
        fill_required(&mut app);
        app.request_submit();
        assert!(app.pending_submit.is_some());
        assert!(app.session.is_submitting());

        app.pending_submit.take();
        app.request_submit();
        assert!(app.pending_submit.is_none(), "second submit must not queue");
        assert_eq!(app.status, StatusLine::Info("Submission already in progress".into()));

        app.update(AppMessage::SubmitFinished(Ok(SubmitReceipt { status: 201 })));
        assert!(!app.session.is_submitting());
        assert_eq!(app.status, StatusLine::Info("Circular submitted (HTTP 201)".into()));
    }

    #[test]
    fn failed_submission_shows_error() {
        let mut app = app();
        fill_required(&mut app);
        app.request_submit();
        app.update(AppMessage::SubmitFinished(Err(SubmitError::Rejected {
            status: 500,
            body: "boom".into(),
        })));
        assert!(matches!(app.status, StatusLine::Error(ref m) if m.contains("500")));
        assert!(!app.session.is_submitting());
    }

    #[test]
    fn quit_message() {
        let mut app = app();
        app.update(AppMessage::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn key_input_routes_through_update() {
        let mut app = app();
        app.update(AppMessage::Input(KeyEvent::new(
            KeyCode::Char('H'),
            KeyModifiers::SHIFT,
        )));
        assert_eq!(app.session.state().get_field(SUBJECT).unwrap(), "H");
    }
}
