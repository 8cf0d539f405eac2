//! Danger zone: untouched tasks that are running out of time.
//!
//! A `NotStarted` task is flagged when either
//! - fewer than `danger_days_left` days remain, or
//! - more than `danger_elapsed_pct` percent of its lifetime has passed.
//!
//! Flagged tasks are ordered soonest-due first and cut to `danger_top_n`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::policy::RiskPolicy;
use crate::task::Task;
use crate::time::days_between;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DangerZoneItem {
    pub task: Task,
    /// Fractional days until due; negative when overdue.
    pub days_left: f64,
    /// Percent of `created_at..due_date` already elapsed.
    ///
    /// Not guarded: a zero-length lifetime yields an infinite or NaN value.
    /// An inverted one (created after due) has a negative denominator, so
    /// while `now` is before `created_at` both terms are negative and the
    /// percent comes out large and positive.
    pub lifetime_elapsed_pct: f64,
}

impl DangerZoneItem {
    pub fn label(&self) -> String {
        if self.days_left <= 0.0 {
            "DUE TODAY".to_string()
        } else {
            format!("{} DAYS LEFT", self.days_left.ceil() as i64)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DangerZone {
    pub items: Vec<DangerZoneItem>,
}

impl DangerZone {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

fn assess_task(task: &Task, now: DateTime<Utc>) -> DangerZoneItem {
    let days_left = days_between(now, task.due_date);

    let elapsed_ms = (now - task.created_at).num_milliseconds() as f64;
    let lifetime_ms = (task.due_date - task.created_at).num_milliseconds() as f64;
    let lifetime_elapsed_pct = elapsed_ms / lifetime_ms * 100.0;

    DangerZoneItem {
        task: task.clone(),
        days_left,
        lifetime_elapsed_pct,
    }
}

pub fn compute_danger_zone(tasks: &[Task], now: DateTime<Utc>, policy: &RiskPolicy) -> DangerZone {
    let mut items: Vec<DangerZoneItem> = tasks
        .iter()
        .filter(|t| t.is_not_started())
        .map(|t| assess_task(t, now))
        .filter(|i| {
            i.days_left < policy.danger_days_left
                || i.lifetime_elapsed_pct > policy.danger_elapsed_pct
        })
        .collect();

    // Stable: equal days_left keep input order.
    items.sort_by(|a, b| a.days_left.total_cmp(&b.days_left));
    items.truncate(policy.danger_top_n);

    DangerZone { items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 14, 12, 0, 0).unwrap()
    }

    /// Not-started task created `ago` before now and due `left` after now.
    fn pending(id: &str, ago: Duration, left: Duration) -> Task {
        Task::new(id, "ALGORITHMS", id, now() - ago, now() + left)
    }

    fn ids(z: &DangerZone) -> Vec<&str> {
        z.items.iter().map(|i| i.task.id.as_str()).collect()
    }

    #[test]
    fn empty_input_empty_zone() {
        let z = compute_danger_zone(&[], now(), &RiskPolicy::default());
        assert!(z.is_empty());
    }

    #[test]
    fn proportional_pressure_alone_qualifies() {
        // 30 of 40 days elapsed: 75%, 10 days left.
        let t = pending("far-but-late", Duration::days(30), Duration::days(10));
        let z = compute_danger_zone(&[t], now(), &RiskPolicy::default());
        assert_eq!(z.len(), 1);
        assert!((z.items[0].days_left - 10.0).abs() < 1e-9);
        assert!((z.items[0].lifetime_elapsed_pct - 75.0).abs() < 1e-9);
    }

    #[test]
    fn absolute_proximity_alone_qualifies() {
        // ~5% of lifetime elapsed but only 2 days left.
        let t = pending("fresh-but-close", Duration::minutes(152), Duration::days(2));
        let z = compute_danger_zone(&[t], now(), &RiskPolicy::default());
        assert_eq!(z.len(), 1);
        assert!(z.items[0].lifetime_elapsed_pct < 6.0);
    }

    #[test]
    fn neither_signal_is_not_flagged() {
        let t = pending("calm", Duration::days(2), Duration::days(20));
        let z = compute_danger_zone(&[t], now(), &RiskPolicy::default());
        assert!(z.is_empty());
    }

    #[test]
    fn started_tasks_are_ignored() {
        let t = pending("wip", Duration::days(9), Duration::hours(3))
            .with_status(TaskStatus::InProgress)
            .with_started_at(now());
        let z = compute_danger_zone(&[t], now(), &RiskPolicy::default());
        assert!(z.is_empty());
    }

    #[test]
    fn sorted_soonest_first_and_cut_to_three() {
        let tasks = vec![
            // 20 of 30 days elapsed keeps the 10-day task qualifying.
            pending("d10", Duration::days(20), Duration::days(10)),
            pending("d-1", Duration::days(5), Duration::days(-1)),
            pending("d3", Duration::days(1), Duration::days(3)),
            pending("d0", Duration::days(4), Duration::zero()),
            pending("d4", Duration::days(1), Duration::days(4)),
        ];
        let z = compute_danger_zone(&tasks, now(), &RiskPolicy::default());
        assert_eq!(ids(&z), vec!["d-1", "d0", "d3"]);
        let days: Vec<f64> = z.items.iter().map(|i| i.days_left).collect();
        assert_eq!(days, vec![-1.0, 0.0, 3.0]);
    }

    #[test]
    fn ties_keep_input_order() {
        let tasks = vec![
            pending("b", Duration::days(1), Duration::days(1)),
            pending("a", Duration::days(1), Duration::days(1)),
        ];
        let z = compute_danger_zone(&tasks, now(), &RiskPolicy::default());
        assert_eq!(ids(&z), vec!["b", "a"]);
    }

    #[test]
    fn zero_length_lifetime_is_not_guarded() {
        // created == due: elapsed/0 is +inf once time has passed.
        let at = now() - Duration::hours(1);
        let t = Task::new("zero", "CPP", "zero", at, at);
        let z = compute_danger_zone(&[t], now(), &RiskPolicy::default());
        assert_eq!(z.len(), 1);
        assert!(z.items[0].lifetime_elapsed_pct.is_infinite());

        // created == due == now: 0/0 is NaN, still flagged by days_left.
        let t = Task::new("nan", "CPP", "nan", now(), now());
        let z = compute_danger_zone(&[t], now(), &RiskPolicy::default());
        assert_eq!(z.len(), 1);
        assert!(z.items[0].lifetime_elapsed_pct.is_nan());
    }

    #[test]
    fn inverted_lifetime_is_not_guarded() {
        // created 30 days ahead, due 20 days ahead: -30d / -10d = 300%.
        let t = Task::new(
            "inv",
            "CPP",
            "inv",
            now() + Duration::days(30),
            now() + Duration::days(20),
        );
        let z = compute_danger_zone(&[t], now(), &RiskPolicy::default());
        assert_eq!(z.len(), 1);
        assert!((z.items[0].lifetime_elapsed_pct - 300.0).abs() < 1e-9);
        assert!((z.items[0].days_left - 20.0).abs() < 1e-9);
    }

    #[test]
    fn labels() {
        let mut item = assess_task(&pending("x", Duration::days(1), Duration::hours(30)), now());
        assert_eq!(item.label(), "2 DAYS LEFT");
        item.days_left = 0.0;
        assert_eq!(item.label(), "DUE TODAY");
        item.days_left = -3.2;
        assert_eq!(item.label(), "DUE TODAY");
    }

    #[test]
    fn custom_policy_thresholds() {
        let policy = RiskPolicy {
            danger_days_left: 1.0,
            danger_elapsed_pct: 90.0,
            danger_top_n: 1,
            ..RiskPolicy::default()
        };
        let tasks = vec![
            pending("soon", Duration::days(1), Duration::hours(12)),
            pending("sooner", Duration::days(1), Duration::hours(6)),
            pending("mid", Duration::days(1), Duration::days(3)),
        ];
        let z = compute_danger_zone(&tasks, now(), &policy);
        assert_eq!(ids(&z), vec!["sooner"]);
    }

    #[test]
    fn same_input_same_output() {
        let tasks = vec![
            pending("a", Duration::days(3), Duration::days(1)),
            pending("b", Duration::days(30), Duration::days(8)),
        ];
        let p = RiskPolicy::default();
        let a = serde_json::to_string(&compute_danger_zone(&tasks, now(), &p)).unwrap();
        let b = serde_json::to_string(&compute_danger_zone(&tasks, now(), &p)).unwrap();
        assert_eq!(a, b);
    }
}
