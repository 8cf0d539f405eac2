//! Upcoming deadlines: the next few open tasks by due date, whatever their
//! progress. Unlike the danger zone, in-progress work is listed too.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::policy::RiskPolicy;
use crate::task::{Task, TaskStatus};
use crate::time::days_between;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingItem {
    pub task: Task,
    /// Days until due, rounded up. Zero or negative once the deadline passed.
    pub days_left: i64,
    pub due_soon: bool,
}

impl UpcomingItem {
    pub fn label(&self) -> String {
        format!("{}d", self.days_left)
    }
}

pub fn upcoming_deadlines(
    tasks: &[Task],
    now: DateTime<Utc>,
    policy: &RiskPolicy,
) -> Vec<UpcomingItem> {
    let mut open: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.status != TaskStatus::Completed)
        .collect();
    // Stable: equal due dates keep input order.
    open.sort_by_key(|t| t.due_date);

    open.into_iter()
        .take(policy.upcoming_top_n)
        .map(|t| {
            let days_left = days_between(now, t.due_date).ceil() as i64;
            UpcomingItem {
                task: t.clone(),
                days_left,
                due_soon: days_left <= policy.due_soon_days,
            }
        })
        .collect()
}
