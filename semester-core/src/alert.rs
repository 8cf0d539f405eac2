//! Composite gate over both risk signals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::danger_zone::{compute_danger_zone, DangerZone};
use crate::policy::RiskPolicy;
use crate::procrastination::{compute_procrastination_score, ProcrastinationScore, ScoreTier};
use crate::task::Task;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub score: ProcrastinationScore,
    pub danger_zone: DangerZone,
    /// False only when nothing is at risk and the score tier is `Low`.
    pub show_alert: bool,
}

pub fn should_alert(score: &ProcrastinationScore, danger_zone: &DangerZone) -> bool {
    !(danger_zone.is_empty() && score.tier == ScoreTier::Low)
}

/// Recompute both signals from a snapshot.
pub fn assess(tasks: &[Task], now: DateTime<Utc>, policy: &RiskPolicy) -> RiskReport {
    let score = compute_procrastination_score(tasks, policy);
    let danger_zone = compute_danger_zone(tasks, now, policy);
    let show_alert = should_alert(&score, &danger_zone);

    RiskReport {
        score,
        danger_zone,
        show_alert,
    }
}
