//! Task lifecycle transitions and the course counters they feed.
//!
//! Transitions return a `TaskEvent`; course bookkeeping is a separate
//! reducer over those events so scoring never sees mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::course::{Course, StudySession};
use crate::task::{Task, TaskStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskEvent {
    Added { course_id: String },
    Removed { course_id: String },
    Completed { course_id: String },
    Reopened { course_id: String },
}

impl TaskEvent {
    pub fn course_id(&self) -> &str {
        match self {
            TaskEvent::Added { course_id }
            | TaskEvent::Removed { course_id }
            | TaskEvent::Completed { course_id }
            | TaskEvent::Reopened { course_id } => course_id,
        }
    }
}

/// Flip a task between done and not done.
///
/// `Completed` goes back to `InProgress`; anything else becomes `Completed`.
/// `started_at` is stamped only on the way into `InProgress`, so a task
/// completed straight from `NotStarted` carries no start time.
pub fn toggle_status(task: &mut Task, now: DateTime<Utc>) -> TaskEvent {
    let course_id = task.course_id.clone();
    if task.status == TaskStatus::Completed {
        task.status = TaskStatus::InProgress;
        if task.started_at.is_none() {
            task.started_at = Some(now);
        }
        TaskEvent::Reopened { course_id }
    } else {
        task.status = TaskStatus::Completed;
        TaskEvent::Completed { course_id }
    }
}

/// Begin work on an untouched task. Returns false when it was already
/// past `NotStarted`.
///
/// Starting moves no course counter, so there is no event.
pub fn mark_started(task: &mut Task, now: DateTime<Utc>) -> bool {
    if task.status != TaskStatus::NotStarted {
        return false;
    }
    task.status = TaskStatus::InProgress;
    if task.started_at.is_none() {
        task.started_at = Some(now);
    }
    true
}

pub fn apply_event(courses: &mut [Course], event: &TaskEvent) {
    let Some(course) = courses.iter_mut().find(|c| c.id == event.course_id()) else {
        return;
    };
    match event {
        TaskEvent::Added { .. } => course.total_assignments += 1,
        TaskEvent::Removed { .. } => {
            course.total_assignments = course.total_assignments.saturating_sub(1)
        }
        TaskEvent::Completed { .. } => course.completed_assignments += 1,
        TaskEvent::Reopened { .. } => {
            course.completed_assignments = course.completed_assignments.saturating_sub(1)
        }
    }
}

/// Credit a study session's hours to its course, kept to one decimal.
pub fn apply_session(courses: &mut [Course], session: &StudySession) {
    if let Some(course) = courses.iter_mut().find(|c| c.id == session.course_id) {
        course.hours_completed = round1(course.hours_completed + session.hours());
    }
}

/// Rebuild assignment counters for `courses` from a task snapshot.
pub fn replay_counters(courses: &[Course], tasks: &[Task]) -> Vec<Course> {
    let mut out: Vec<Course> = courses
        .iter()
        .cloned()
        .map(|mut c| {
            c.total_assignments = 0;
            c.completed_assignments = 0;
            c
        })
        .collect();

    for t in tasks {
        let course_id = t.course_id.clone();
        apply_event(&mut out, &TaskEvent::Added { course_id: course_id.clone() });
        if t.status == TaskStatus::Completed {
            apply_event(&mut out, &TaskEvent::Completed { course_id });
        }
    }
    out
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
