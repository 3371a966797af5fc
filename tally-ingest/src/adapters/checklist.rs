use tally_core::{END_OF_DAY, Task, TaskKind, TaskStatus};

use super::assignee;
use crate::dates::DateParser;
use crate::types::ChecklistRow;

/// Checklist items are due by the end of their day unless a time is given.
pub fn normalize_checklist(row: &ChecklistRow, dates: &DateParser) -> Task {
    Task {
        id: row.id.trim().to_string(),
        kind: TaskKind::Checklist,
        assignee: assignee(&row.doer),
        status: TaskStatus::from_raw(&row.status),
        planned_date: dates.date(&row.task_date),
        planned_time: dates.time(&row.planned_time).or(Some(END_OF_DAY)),
        actual_date: dates.date(&row.actual_date),
        actual_time: dates.time(&row.actual_time),
    }
}
