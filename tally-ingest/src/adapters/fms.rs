use tally_core::{Task, TaskKind, TaskStatus};

use super::assignee;
use crate::dates::DateParser;
use crate::types::FmsRow;

pub fn normalize_fms(row: &FmsRow, dates: &DateParser) -> Task {
    let (planned_date, planned_time) = dates.datetime(&row.planned);
    let (actual_date, actual_time) = dates.datetime(&row.actual);

    Task {
        id: row.id.trim().to_string(),
        kind: TaskKind::Fms,
        assignee: assignee(&row.doer),
        status: TaskStatus::from_raw(&row.status),
        planned_date,
        planned_time,
        actual_date,
        actual_time,
    }
}
