//! Procrastination score: how late, relative to the time available, work
//! usually starts.
//!
//! For every task that has been started at least once:
//!
//! ```text
//! total = max(due - created, 1ms)
//! ratio = clamp((started - created) / total, 0, 1)
//! ```
//!
//! The score is the mean ratio scaled to 0..10, or the policy's neutral
//! score when there is no history.

use serde::{Deserialize, Serialize};

use crate::policy::RiskPolicy;
use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreTier {
    /// Proactive.
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MED")]
    Medium,
    /// Chronic procrastination.
    #[serde(rename = "HIGH")]
    High,
}

impl ScoreTier {
    pub fn classify(score: f64, policy: &RiskPolicy) -> Self {
        if score < policy.low_tier_below {
            ScoreTier::Low
        } else if score < policy.high_tier_from {
            ScoreTier::Medium
        } else {
            ScoreTier::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreTier::Low => "LOW",
            ScoreTier::Medium => "MED",
            ScoreTier::High => "HIGH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcrastinationScore {
    /// 0..=10, higher means later starts.
    pub score: f64,
    pub tier: ScoreTier,
    /// Number of started tasks the score was computed from.
    pub sample_size: usize,
}

/// Start delay over the task's lifetime, before clamping. Late starts go
/// above 1 and skewed clocks below 0.
///
/// `None` for tasks that never left `NotStarted` or carry no `started_at`.
pub fn delay_fraction_unclamped(task: &Task) -> Option<f64> {
    if task.is_not_started() {
        return None;
    }
    let started = task.started_at?;

    let total_ms = (task.due_date - task.created_at).num_milliseconds().max(1);
    let delay_ms = (started - task.created_at).num_milliseconds();

    Some(delay_ms as f64 / total_ms as f64)
}

/// Share of the task's lifetime that passed before work began, in `[0, 1]`.
pub fn delay_ratio(task: &Task) -> Option<f64> {
    delay_fraction_unclamped(task).map(|r| r.clamp(0.0, 1.0))
}

pub fn compute_procrastination_score(tasks: &[Task], policy: &RiskPolicy) -> ProcrastinationScore {
    let (sum, count) = tasks
        .iter()
        .filter_map(delay_ratio)
        .fold((0.0_f64, 0_usize), |(sum, n), r| (sum + r, n + 1));

    let score = if count > 0 {
        (sum / count as f64) * 10.0
    } else {
        policy.neutral_score
    };

    ProcrastinationScore {
        score,
        tier: ScoreTier::classify(score, policy),
        sample_size: count,
    }
}
