//! Thresholds used by the procrastination score and the danger zone.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskPolicy {
    /// Score reported when no task has been started yet.
    pub neutral_score: f64,
    /// Scores strictly below this are `Low`.
    pub low_tier_below: f64,
    /// Scores at or above this are `High`.
    pub high_tier_from: f64,
    /// A not-started task due in fewer days than this is at risk.
    pub danger_days_left: f64,
    /// A not-started task past this share (percent) of its lifetime is at risk.
    pub danger_elapsed_pct: f64,
    pub danger_top_n: usize,
    /// Open tasks listed under upcoming deadlines.
    pub upcoming_top_n: usize,
    /// Whole days left (rounded up) at or below which a deadline is due soon.
    pub due_soon_days: i64,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            neutral_score: 5.0,
            low_tier_below: 3.0,
            high_tier_from: 7.0,
            danger_days_left: 5.0,
            danger_elapsed_pct: 60.0,
            danger_top_n: 3,
            upcoming_top_n: 3,
            due_soon_days: 3,
        }
    }
}

impl RiskPolicy {
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("neutral_score", self.neutral_score),
            ("low_tier_below", self.low_tier_below),
            ("high_tier_from", self.high_tier_from),
            ("danger_days_left", self.danger_days_left),
            ("danger_elapsed_pct", self.danger_elapsed_pct),
        ];
        for (name, v) in fields {
            if !v.is_finite() {
                return Err(format!("{name} must be finite"));
            }
        }
        for (name, v) in &fields[..3] {
            if !(0.0..=10.0).contains(v) {
                return Err(format!("{name} must be within 0..=10, got {v}"));
            }
        }
        if self.low_tier_below > self.high_tier_from {
            return Err(format!(
                "low_tier_below ({}) must not exceed high_tier_from ({})",
                self.low_tier_below, self.high_tier_from
            ));
        }
        Ok(())
    }
}
