//! semester-core: assignment model, procrastination scoring and danger-zone
//! detection for the semester dashboard.
//!
//! Everything here is a pure function of a task snapshot (plus `now`).

pub mod alert;
pub mod brief;
pub mod course;
pub mod danger_zone;
pub mod lifecycle;
pub mod policy;
pub mod procrastination;
pub mod task;
pub mod time;
pub mod upcoming;

pub use alert::{assess, should_alert, RiskReport};
pub use brief::{coaching_brief, CoachingBrief, DangerEntry, HistoryEntry};
pub use course::{Course, StudySession};
pub use danger_zone::{compute_danger_zone, DangerZone, DangerZoneItem};
pub use lifecycle::{apply_event, apply_session, mark_started, replay_counters, toggle_status, TaskEvent};
pub use policy::RiskPolicy;
pub use procrastination::{compute_procrastination_score, delay_ratio, ProcrastinationScore, ScoreTier};
pub use task::{Task, TaskStatus};
pub use upcoming::{upcoming_deadlines, UpcomingItem};
