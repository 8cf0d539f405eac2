//! JSON snapshot of the dashboard state: courses, assignments and study sessions.

use anyhow::{Context, Result};
use semester_core::{Course, StudySession, Task};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub assignments: Vec<Task>,
    #[serde(default)]
    pub sessions: Vec<StudySession>,
}

impl Snapshot {
    pub fn from_assignments(assignments: Vec<Task>) -> Self {
        Self {
            assignments,
            ..Self::default()
        }
    }

    pub fn course_name(&self, course_id: &str) -> Option<&str> {
        self.courses
            .iter()
            .find(|c| c.id == course_id)
            .map(|c| c.name.as_str())
    }

    pub fn validate(&self) -> Result<(), String> {
        for (idx, c) in self.courses.iter().enumerate() {
            if c.id.trim().is_empty() {
                return Err(format!("courses[{idx}]: id must be non-empty"));
            }
        }
        for (idx, t) in self.assignments.iter().enumerate() {
            t.validate().map_err(|e| format!("assignments[{idx}]: {e}"))?;
        }
        for (idx, s) in self.sessions.iter().enumerate() {
            s.validate().map_err(|e| format!("sessions[{idx}]: {e}"))?;
        }
        Ok(())
    }
}

pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Snapshot> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let snap: Snapshot =
        serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    snap.validate()
        .map_err(|e| anyhow::anyhow!("invalid snapshot {}: {e}", path.display()))?;

    tracing::debug!(
        courses = snap.courses.len(),
        assignments = snap.assignments.len(),
        sessions = snap.sessions.len(),
        "loaded snapshot from {}",
        path.display()
    );
    Ok(snap)
}
