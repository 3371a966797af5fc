use tally_core::{Task, TaskKind, TaskStatus};

use super::assignee;
use crate::dates::DateParser;
use crate::types::DelegationRow;

pub fn normalize_delegation(row: &DelegationRow, dates: &DateParser) -> Task {
    Task {
        id: row.id.trim().to_string(),
        kind: TaskKind::Delegation,
        assignee: assignee(&row.doer),
        status: TaskStatus::from_raw(&row.status),
        planned_date: dates.date(&row.planned_date),
        planned_time: dates.time(&row.planned_time),
        actual_date: dates.date(&row.actual_date),
        actual_time: dates.time(&row.actual_time),
    }
}
