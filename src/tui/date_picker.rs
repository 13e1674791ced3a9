//! Minimal keyboard date picker for the date-of-issue field.
//!
//! Moves a cursor date by day or month and hands back the `dd-mm-yyyy`
//! string the form expects. The form never sees the cursor, only the
//! formatted value the app forwards via `FormSession::on_date_selected`.

use chrono::{Days, Local, Months, NaiveDate};

/// Date-of-issue format.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone)]
pub struct DatePicker {
    cursor: NaiveDate,
    today: NaiveDate,
}

impl DatePicker {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            cursor: today,
            today,
        }
    }

    /// Picker anchored at the local calendar date.
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn shift_days(&mut self, days: i64) {
        let delta = Days::new(days.unsigned_abs());
        let moved = if days >= 0 {
            self.cursor.checked_add_days(delta)
        } else {
            self.cursor.checked_sub_days(delta)
        };
        if let Some(date) = moved {
            self.cursor = date;
        }
    }

    /// Month arithmetic clamps to the last day of a shorter month.
    pub fn shift_months(&mut self, months: i32) {
        let delta = Months::new(months.unsigned_abs());
        let moved = if months >= 0 {
            self.cursor.checked_add_months(delta)
        } else {
            self.cursor.checked_sub_months(delta)
        };
        if let Some(date) = moved {
            self.cursor = date;
        }
    }

    pub fn reset_to_today(&mut self) {
        self.cursor = self.today;
    }

    pub fn formatted(&self) -> String {
        self.cursor.format(DATE_FORMAT).to_string()
    }
}

/// Accept a `dd-mm-yyyy` date from the command line, normalised
/// (so `5-3-2025` becomes `05-03-2025`).
pub fn normalize_date(raw: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .map_err(|e| format!("expected dd-mm-yyyy, got '{raw}': {e}"))
}
