//! Plain-text rendering of the risk outputs.

use semester_core::{Course, DangerZone, ProcrastinationScore, RiskReport, UpcomingItem};
use semester_ingest::Snapshot;
use std::fmt::Write;

pub fn score_line(score: &ProcrastinationScore) -> String {
    format!(
        "Procrastination score: {:.1}/10 [{}] (from {} started tasks)",
        score.score,
        score.tier.as_str(),
        score.sample_size
    )
}

pub fn danger_lines(zone: &DangerZone, snap: &Snapshot) -> String {
    if zone.is_empty() {
        return "No immediate threats detected.\n".to_string();
    }
    let mut out = String::from("Danger zone (high risk of delay):\n");
    for item in &zone.items {
        let course = snap
            .course_name(&item.task.course_id)
            .unwrap_or(&item.task.course_id);
        let _ = writeln!(
            out,
            "- [{}] {} | {} | {:.0}% of lifetime elapsed",
            course,
            item.task.name,
            item.label(),
            item.lifetime_elapsed_pct
        );
    }
    out
}

pub fn upcoming(items: &[UpcomingItem], snap: &Snapshot) -> String {
    if items.is_empty() {
        return "No upcoming deadlines.\n".to_string();
    }
    let mut out = String::from("Upcoming deadlines:\n");
    for item in items {
        let course = snap
            .course_name(&item.task.course_id)
            .unwrap_or(&item.task.course_id);
        let _ = write!(out, "- [{}] {} | {}", course, item.task.name, item.label());
        if item.due_soon {
            out.push_str(" | DUE SOON");
        }
        out.push('\n');
    }
    out
}

pub fn report(report: &RiskReport, snap: &Snapshot) -> String {
    if !report.show_alert {
        return "Nothing to display: no tasks at risk and a low procrastination score.\n"
            .to_string();
    }
    format!("{}\n\n{}", score_line(&report.score), danger_lines(&report.danger_zone, snap))
}

pub fn courses(courses: &[Course]) -> String {
    let mut out = String::new();
    for c in courses {
        let _ = writeln!(
            out,
            "{:<20} {:>6.1}/{:<5} hrs {:>3}% | assignments {}/{}",
            c.name,
            c.hours_completed,
            c.total_hours_target,
            c.progress_pct(),
            c.completed_assignments,
            c.total_assignments
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use semester_core::{assess, upcoming_deadlines, RiskPolicy, Task, TaskStatus};

    #[test]
    fn suppressed_report_says_nothing_to_display() {
        let now = Utc.with_ymd_and_hms(2025, 11, 14, 12, 0, 0).unwrap();
        let early = Task::new("1", "CPP", "Early", now - Duration::days(10), now - Duration::days(1))
            .with_status(TaskStatus::Completed)
            .with_started_at(now - Duration::days(10));
        let r = assess(&[early], now, &RiskPolicy::default());
        let text = report(&r, &Snapshot::default());
        assert!(text.starts_with("Nothing to display"));
    }

    #[test]
    fn danger_lines_use_course_names_when_known() {
        let now = Utc.with_ymd_and_hms(2025, 11, 14, 12, 0, 0).unwrap();
        let t = Task::new("3", "CPP", "Project 1: Pointers", now - Duration::days(10), now + Duration::days(2));
        let r = assess(&[t], now, &RiskPolicy::default());
        let snap = Snapshot {
            courses: vec![Course::new("CPP", "C++ / Python")],
            ..Snapshot::default()
        };
        let text = danger_lines(&r.danger_zone, &snap);
        assert!(text.contains("[C++ / Python] Project 1: Pointers | 2 DAYS LEFT"), "{text}");
    }

    #[test]
    fn upcoming_flags_due_soon_only_when_close() {
        let now = Utc.with_ymd_and_hms(2025, 11, 14, 12, 0, 0).unwrap();
        let tasks = vec![
            Task::new("2", "ALGORITHMS", "Maman 12", now - Duration::days(5), now + Duration::hours(36)),
            Task::new("4", "COMPLEXITY", "Problem Set 3", now - Duration::days(5), now + Duration::days(11)),
        ];
        let items = upcoming_deadlines(&tasks, now, &RiskPolicy::default());
        let text = upcoming(&items, &Snapshot::default());
        assert!(text.contains("- [ALGORITHMS] Maman 12 | 2d | DUE SOON\n"), "{text}");
        assert!(text.contains("- [COMPLEXITY] Problem Set 3 | 11d\n"), "{text}");
        assert_eq!(upcoming(&[], &Snapshot::default()), "No upcoming deadlines.\n");
    }
}
