//! Headless driver — fill, preview and submit a circular without the TUI.
//!
//! Plays the presentation layer's part: values pass the input boundary
//! (`FieldDefinition::admit`) before reaching the session, and required
//! fields are checked before the submission gate runs.

use crate::form::{registry, FormError};
use crate::session::{FormSession, SessionError, SubmitOutcome};
use crate::submit::{SubmitError, SubmitReceipt, Submitter};

#[derive(Debug, thiserror::Error)]
pub enum HeadlessError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("required fields are empty: {}", .0.join(", "))]
    MissingRequired(Vec<String>),

    #[error("Invalid email(s):\n{}", .0.join("\n"))]
    InvalidEmails(Vec<String>),

    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Values to apply to a fresh session.
#[derive(Debug, Clone, Default)]
pub struct FillRequest {
    /// `(field name, value)` in the order given.
    pub assignments: Vec<(String, String)>,
    /// Date of issue, as the date picker would format it.
    pub date: Option<String>,
}

/// Parse a `name=value` command-line assignment.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
    let name = name.trim();
    if registry::field(name).is_none() {
        let known: Vec<_> = registry::fields().iter().map(|f| f.name).collect();
        return Err(format!("unknown field '{name}' (known: {})", known.join(", ")));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Apply a fill request through the input boundary.
pub fn apply(session: &mut FormSession, request: &FillRequest) -> Result<(), HeadlessError> {
    for (name, value) in &request.assignments {
        let def = registry::require_field(name)?;
        let admitted = def.admit(value)?;
        session.set_field(def.name, admitted)?;
    }
    if let Some(date) = &request.date {
        session.on_date_selected(date)?;
    }
    Ok(())
}

/// Check required fields, run the gate, and send an accepted snapshot.
pub async fn submit(
    session: &mut FormSession,
    submitter: &dyn Submitter,
) -> Result<SubmitReceipt, HeadlessError> {
    let missing = session.missing_required();
    if !missing.is_empty() {
        return Err(HeadlessError::MissingRequired(
            missing.into_iter().map(str::to_string).collect(),
        ));
    }

    let snapshot = match session.begin_submit()? {
        SubmitOutcome::Accepted(snapshot) => snapshot,
        SubmitOutcome::Rejected(entries) => return Err(HeadlessError::InvalidEmails(entries)),
    };

    let result = submitter.submit(&snapshot).await;
    session.finish_submit(&result);
    Ok(result?)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::form::registry::*;
    use crate::form::FormSnapshot;

    /// Records every snapshot it is handed.
    #[derive(Default)]
    struct RecordingSubmitter {
        seen: Mutex<Vec<FormSnapshot>>,
        fail: bool,
    }

    #[async_trait]
    impl Submitter for RecordingSubmitter {
        async fn submit(&self, snapshot: &FormSnapshot) -> Result<SubmitReceipt, SubmitError> {
            self.seen.lock().unwrap().push(snapshot.clone());
            if self.fail {
                Err(SubmitError::Rejected {
                    status: 502,
                    body: "bad gateway".into(),
                })
            } else {
                Ok(SubmitReceipt { status: 200 })
            }
        }
    }

    fn complete_request(emails: &str) -> FillRequest {
        let pairs = [
            (SUBJECT, "Industrial Visit"),
            (AGENDA, "Visit to power plant"),
            (AUDIENCE, "Final year"),
            (DEPARTMENT, "Electrical and Electronics Engineering"),
            (URGENCY, "Urgent"),
            (VENUE, "Main gate"),
            (EVENT_DATETIME, "20-03-2025 09:00"),
            (RECIPIENT_EMAIL, emails),
        ];
        FillRequest {
            assignments: pairs
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
            date: Some("15-03-2025".into()),
        }
    }

    #[test]
    fn parse_assignment_splits_on_first_equals() {
        assert_eq!(
            parse_assignment("subject=a=b").unwrap(),
            ("subject".to_string(), "a=b".to_string())
        );
        assert!(parse_assignment("subject").is_err());
        assert!(parse_assignment("nope=x").unwrap_err().contains("unknown field"));
    }

    #[test]
    fn apply_sets_values_and_date() {
        let mut session = FormSession::default();
        apply(&mut session, &complete_request("a@b.com")).unwrap();
        assert_eq!(session.state().get_field(SUBJECT).unwrap(), "Industrial Visit");
        assert_eq!(session.state().get_field(DATE).unwrap(), "15-03-2025");
        assert!(session.missing_required().is_empty());
    }

    #[test]
    fn apply_truncates_long_description() {
        let mut session = FormSession::default();
        let request = FillRequest {
            assignments: vec![(ADDITIONAL_INFO.into(), "x".repeat(INFO_MAX_LENGTH + 10))],
            date: None,
        };
        apply(&mut session, &request).unwrap();
        assert_eq!(session.counters().info_length, INFO_MAX_LENGTH);
    }

    #[test]
    fn apply_rejects_undeclared_option() {
        let mut session = FormSession::default();
        let request = FillRequest {
            assignments: vec![(URGENCY.into(), "Someday".into())],
            date: None,
        };
        assert!(matches!(
            apply(&mut session, &request),
            Err(HeadlessError::Form(FormError::InvalidOption { .. }))
        ));
    }

    #[test]
    fn apply_rejects_typed_date() {
        let mut session = FormSession::default();
        let request = FillRequest {
            assignments: vec![(DATE.into(), "01-01-2025".into())],
            date: None,
        };
        assert!(matches!(
            apply(&mut session, &request),
            Err(HeadlessError::Form(FormError::ReadOnly(DATE)))
        ));
    }

    #[tokio::test]
    async fn submit_forwards_accepted_snapshot() {
        let mut session = FormSession::default();
        apply(&mut session, &complete_request("hod@college.edu")).unwrap();
        let submitter = RecordingSubmitter::default();

        let receipt = submit(&mut session, &submitter).await.unwrap();
        assert_eq!(receipt.status, 200);
        let seen = submitter.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], session.snapshot());
        assert!(!session.is_submitting());
    }

    #[tokio::test]
    async fn submit_blocks_on_missing_required() {
        let mut session = FormSession::default();
        let submitter = RecordingSubmitter::default();
        match submit(&mut session, &submitter).await {
            Err(HeadlessError::MissingRequired(fields)) => {
                assert_eq!(fields.len(), 8);
                assert_eq!(fields[0], SUBJECT);
            }
            other => panic!("expected MissingRequired, got {other:?}"),
        }
        assert!(submitter.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn submit_blocks_on_invalid_emails() {
        let mut session = FormSession::default();
        apply(&mut session, &complete_request("ok@x.in, broken")).unwrap();
        let submitter = RecordingSubmitter::default();
        let err = submit(&mut session, &submitter).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid email(s):\nbroken");
        assert!(submitter.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn endpoint_failure_is_reported_and_guard_released() {
        let mut session = FormSession::default();
        apply(&mut session, &complete_request("")).unwrap();
        let submitter = RecordingSubmitter {
            fail: true,
            ..Default::default()
        };
        let err = submit(&mut session, &submitter).await.unwrap_err();
        assert!(matches!(
            err,
            HeadlessError::Submit(SubmitError::Rejected { status: 502, .. })
        ));
        assert!(!session.is_submitting());
    }
}
