//! Course and study-session records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,

    /// Hours the student plans to spend over the semester.
    #[serde(default)]
    pub total_hours_target: f64,
    #[serde(default)]
    pub hours_completed: f64,

    #[serde(default)]
    pub total_assignments: u32,
    #[serde(default)]
    pub completed_assignments: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_exam_date: Option<NaiveDate>,

    #[serde(default)]
    pub weak_concepts: Vec<String>,
}

impl Course {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            total_hours_target: 0.0,
            hours_completed: 0.0,
            total_assignments: 0,
            completed_assignments: 0,
            next_exam_date: None,
            weak_concepts: Vec::new(),
        }
    }

    pub fn with_hours_target(mut self, hours: f64) -> Self {
        self.total_hours_target = hours;
        self
    }

    pub fn with_hours_completed(mut self, hours: f64) -> Self {
        self.hours_completed = hours;
        self
    }

    /// Whole-percent progress towards the hours target, capped at 100.
    pub fn progress_pct(&self) -> u32 {
        if self.total_hours_target <= 0.0 {
            return 0;
        }
        let pct = (self.hours_completed / self.total_hours_target * 100.0).round();
        pct.clamp(0.0, 100.0) as u32
    }
}

/// A timed block of study attributed to one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySession {
    pub id: String,
    pub course_id: String,
    pub start_time: DateTime<Utc>,
    pub duration_seconds: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// 1 (easy) to 5 (hard).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StudySession {
    pub fn hours(&self) -> f64 {
        self.duration_seconds as f64 / 3600.0
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("id must be non-empty".to_string());
        }
        if self.course_id.trim().is_empty() {
            return Err("course_id must be non-empty".to_string());
        }
        if let Some(d) = self.difficulty {
            if !(1..=5).contains(&d) {
                return Err(format!("difficulty must be 1-5, got {d}"));
            }
        }
        Ok(())
    }
}
