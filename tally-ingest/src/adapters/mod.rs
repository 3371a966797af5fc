//! Per-kind adapters: raw exported rows -> canonical `Task`.
//!
//! Each adapter is a thin mapping. Status strings go through
//! `TaskStatus::from_raw`, dates through `DateParser`, so nothing downstream
//! sees raw cells.

pub mod checklist;
pub mod delegation;
pub mod fms;

pub use checklist::normalize_checklist;
pub use delegation::normalize_delegation;
pub use fms::normalize_fms;

fn assignee(doer: &str) -> Option<String> {
    let d = doer.trim();
    if d.is_empty() { None } else { Some(d.to_string()) }
}
