//! Payload handed to an external coaching service.
//!
//! Only the data is built here. Turning it into advice is someone else's job.

use serde::{Deserialize, Serialize};

use crate::alert::RiskReport;
use crate::procrastination::delay_fraction_unclamped;
use crate::task::Task;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub name: String,
    /// Rounded start delay as a percent of the lifetime. Not clamped: late
    /// starts exceed 100 and skewed clocks go negative.
    pub delay_percent: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DangerEntry {
    pub name: String,
    pub days_left: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachingBrief {
    /// Procrastination score, one decimal.
    pub score: f64,
    pub history: Vec<HistoryEntry>,
    pub danger: Vec<DangerEntry>,
}

fn delay_percent(task: &Task) -> Option<i64> {
    delay_fraction_unclamped(task).map(|r| (r * 100.0).round() as i64)
}

pub fn coaching_brief(tasks: &[Task], report: &RiskReport) -> CoachingBrief {
    let history = tasks
        .iter()
        .filter_map(|t| {
            delay_percent(t).map(|delay_percent| HistoryEntry {
                name: t.name.clone(),
                delay_percent,
            })
        })
        .collect();

    let danger = report
        .danger_zone
        .items
        .iter()
        .map(|i| DangerEntry {
            name: i.task.name.clone(),
            days_left: i.days_left.round() as i64,
        })
        .collect();

    CoachingBrief {
        score: (report.score.score * 10.0).round() / 10.0,
        history,
        danger,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::assess;
    use crate::policy::RiskPolicy;
    use crate::task::TaskStatus;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn brief_carries_unclamped_history_and_rounded_days() {
        let late = Task::new(
            "2",
            "ALGORITHMS",
            "Maman 12: Graph Theory",
            now() - Duration::days(14),
            now() - Duration::days(4),
        )
        .with_status(TaskStatus::InProgress)
        .with_started_at(now() - Duration::days(1));
        let pending = Task::new(
            "3",
            "CPP",
            "Project 1: Pointers",
            now() - Duration::days(10),
            now() + Duration::hours(60),
        );
        let tasks = vec![late, pending];

        let report = assess(&tasks, now(), &RiskPolicy::default());
        let brief = coaching_brief(&tasks, &report);

        // Started 13 days into a 10-day window.
        assert_eq!(brief.history.len(), 1);
        assert_eq!(brief.history[0].delay_percent, 130);
        // The score itself is clamped.
        assert_eq!(brief.score, 10.0);

        assert_eq!(brief.danger.len(), 1);
        assert_eq!(brief.danger[0].name, "Project 1: Pointers");
        assert_eq!(brief.danger[0].days_left, 3);
    }
}
