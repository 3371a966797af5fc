//! tally-ingest: exported task rows (delegation, checklist, fms) into canonical tasks.

pub mod adapters;
pub mod csv_source;
pub mod dates;
pub mod types;

pub use adapters::{normalize_checklist, normalize_delegation, normalize_fms};
pub use csv_source::{
    TaskSources, load_sources, read_checklist, read_checklist_csv, read_delegation,
    read_delegation_csv, read_fms, read_fms_csv, read_mixed, read_mixed_csv,
};
pub use dates::DateParser;
pub use types::{ChecklistRow, DelegationRow, FmsRow, MixedRow};
