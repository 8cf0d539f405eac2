pub mod assignments_csv;
