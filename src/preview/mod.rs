//! Preview renderer — turns a form snapshot into a structured preview.
//!
//! Output is plain data. Escaping for any markup target is done by the
//! display layer (see `crate::markup`), never here.

use serde::Serialize;

use crate::form::registry::{
    ADDITIONAL_INFO, AGENDA, AUDIENCE, DATE, DEPARTMENT, SUBJECT, URGENCY,
};
use crate::form::FormSnapshot;

/// The narrative fields of a circular, copied at the moment of preview.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PreviewDocument {
    pub subject: String,
    pub agenda: String,
    pub audience: String,
    pub department: String,
    pub urgency: String,
    pub date: String,
    pub additional_info: String,
}

impl PreviewDocument {
    /// Captioned rows shown between the heading and the description.
    pub fn labeled_rows(&self) -> [(&'static str, &str); 5] {
        [
            ("Agenda", self.agenda.as_str()),
            ("Audience", self.audience.as_str()),
            ("Dept", self.department.as_str()),
            ("Urgency", self.urgency.as_str()),
            ("Date", self.date.as_str()),
        ]
    }
}

/// Copy the narrative fields out of a snapshot.
pub fn render(snapshot: &FormSnapshot) -> PreviewDocument {
    let get = |name: &str| snapshot.value(name).to_string();
    PreviewDocument {
        subject: get(SUBJECT),
        agenda: get(AGENDA),
        audience: get(AUDIENCE),
        department: get(DEPARTMENT),
        urgency: get(URGENCY),
        date: get(DATE),
        additional_info: get(ADDITIONAL_INFO),
    }
}
