use chrono::{DateTime, Utc};
use chrono_tz::Tz;

// One row to be written to the Notion database.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentPage {
    pub title: String,
    pub course: String,
    pub due_at: Option<DateTime<Utc>>,
    pub completed: bool,
}

// A row already present in the database, keyed by title in the sync pass.
// Pages created within the current run carry no id yet.
#[derive(Debug, Clone)]
pub struct ExistingPage {
    pub page_id: Option<String>,
    pub completed: bool,
}

// Canvas reports due dates in UTC; Notion gets them as wall-clock time in
// the configured timezone plus an explicit time_zone field.
pub fn localize_due_date(due_at: &DateTime<Utc>, timezone: Tz) -> String {
    due_at
        .with_timezone(&timezone)
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}
