//! Parse an assignments sheet exported as CSV.
//!
//! Expected header (any order, case-insensitive):
//!   id,course_id,name,due_date,status,created_at,started_at[,estimated_hours]
//!
//! Timestamps without an offset are read in the caller's timezone.

use anyhow::{bail, Context, Result};
use chrono_tz::Tz;
use semester_core::time::parse_timestamp;
use semester_core::{Task, TaskStatus};
use std::collections::HashMap;
use std::path::Path;

const REQUIRED: [&str; 4] = ["id", "course_id", "due_date", "created_at"];

struct Columns(HashMap<String, usize>);

impl Columns {
    fn get<'r>(&self, record: &'r csv::StringRecord, name: &str) -> &'r str {
        self.0
            .get(name)
            .and_then(|&i| record.get(i))
            .map(str::trim)
            .unwrap_or("")
    }
}

pub fn parse_assignments_csv(path: impl AsRef<Path>, tz: Tz) -> Result<Vec<Task>> {
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()
        .with_context(|| format!("reading header of {}", path.display()))?;
    let cols = Columns(
        headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_lowercase(), i))
            .collect(),
    );
    for name in REQUIRED {
        if !cols.0.contains_key(name) {
            bail!("{}: missing column '{name}'", path.display());
        }
    }

    let mut tasks = Vec::new();

    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        // Header is line 1.
        let line = row + 2;

        let id = cols.get(&record, "id");
        if id.is_empty() {
            tracing::warn!(line, "skipping row without id");
            continue;
        }

        let due_date = match parse_timestamp(cols.get(&record, "due_date"), tz) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(line, id, "skipping row: due_date: {e}");
                continue;
            }
        };
        let created_at = match parse_timestamp(cols.get(&record, "created_at"), tz) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(line, id, "skipping row: created_at: {e}");
                continue;
            }
        };

        let started_raw = cols.get(&record, "started_at");
        let started_at = if started_raw.is_empty() {
            None
        } else {
            match parse_timestamp(started_raw, tz) {
                Ok(d) => Some(d),
                Err(e) => {
                    tracing::warn!(line, id, "ignoring started_at: {e}");
                    None
                }
            }
        };

        let status_raw = cols.get(&record, "status");
        let status = TaskStatus::parse_loose(status_raw).unwrap_or_else(|| {
            if !status_raw.is_empty() {
                tracing::warn!(line, id, status = status_raw, "unknown status, using NOT_STARTED");
            }
            TaskStatus::NotStarted
        });

        let name = match cols.get(&record, "name") {
            "" => id,
            n => n,
        };

        let estimated_hours = match cols.get(&record, "estimated_hours") {
            "" => 0.0,
            raw => raw.parse::<f64>().unwrap_or_else(|e| {
                tracing::warn!(line, id, estimated_hours = raw, "ignoring estimated_hours: {e}");
                0.0
            }),
        };

        tasks.push(Task {
            id: id.to_string(),
            course_id: cols.get(&record, "course_id").to_string(),
            name: name.to_string(),
            due_date,
            created_at,
            started_at,
            status,
            estimated_hours,
            notes: None,
        });
    }

    tracing::debug!(count = tasks.len(), "parsed assignments from {}", path.display());
    Ok(tasks)
}
