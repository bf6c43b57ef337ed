use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Course {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

impl Course {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown Course")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Assignment {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
}

impl Assignment {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Untitled Assignment")
    }
}

// The caller's own submission for an assignment. Anything past an open
// attempt (submitted, graded, or waiting on review) counts as submitted.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Submission {
    #[serde(default)]
    pub workflow_state: Option<String>,
}

impl Submission {
    pub fn is_submitted(&self) -> bool {
        matches!(
            self.workflow_state.as_deref(),
            Some("submitted") | Some("graded") | Some("pending_review")
        )
    }
}
