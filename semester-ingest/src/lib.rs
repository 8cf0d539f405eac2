//! semester-ingest: load assignment snapshots from JSON exports and CSV sheets.

pub mod parsers;
pub mod snapshot;

pub use parsers::assignments_csv::parse_assignments_csv;
pub use snapshot::{load_snapshot, Snapshot};
