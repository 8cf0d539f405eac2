//! Assignment model: the unit of work the risk core reads.
//!
//! Lifecycle is owned by the caller. The scoring functions only borrow
//! snapshots of these records; see `lifecycle` for the transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Lenient parse used by sheet imports. Accepts `NOT_STARTED`,
    /// `not started`, `in-progress`, ...
    pub fn parse_loose(raw: &str) -> Option<Self> {
        let norm: String = raw
            .trim()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c.to_ascii_uppercase() })
            .collect();
        match norm.as_str() {
            "NOT_STARTED" | "TODO" => Some(TaskStatus::NotStarted),
            "IN_PROGRESS" | "STARTED" => Some(TaskStatus::InProgress),
            "COMPLETED" | "DONE" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

/// An assignment-like unit of work.
///
/// `created_at <= due_date` and `started_at >= created_at` are expected but
/// never enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub course_id: String,
    pub name: String,

    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    /// Set the first time the task leaves `NotStarted`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default)]
    pub estimated_hours: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        course_id: impl Into<String>,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            course_id: course_id.into(),
            name: name.into(),
            due_date,
            created_at,
            started_at: None,
            status: TaskStatus::NotStarted,
            estimated_hours: 0.0,
            notes: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = Some(started_at);
        self
    }

    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn is_not_started(&self) -> bool {
        self.status == TaskStatus::NotStarted
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("id must be non-empty".to_string());
        }
        if self.course_id.trim().is_empty() {
            return Err("course_id must be non-empty".to_string());
        }
        Ok(())
    }
}
