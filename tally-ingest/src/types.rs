use serde::{Deserialize, Serialize};

/// Row from the delegation table: separate date and time columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelegationRow {
    pub id: String,
    #[serde(alias = "assigned_to", alias = "doer_name")]
    pub doer: String,
    pub status: String,
    pub planned_date: String,
    pub planned_time: String,
    pub actual_date: String,
    pub actual_time: String,
}

/// Row from the checklist subtask table. Without a planned time the task is
/// due by the end of `task_date`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistRow {
    pub id: String,
    #[serde(alias = "assigned_to", alias = "doer_name")]
    pub doer: String,
    pub status: String,
    #[serde(alias = "planned_date")]
    pub task_date: String,
    pub planned_time: String,
    pub actual_date: String,
    pub actual_time: String,
}

/// Row from the fms table as imported from the sheet: planned and actual are
/// single combined date-time cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FmsRow {
    pub id: String,
    #[serde(alias = "assigned_to", alias = "doer_name")]
    pub doer: String,
    pub status: String,
    pub planned: String,
    pub actual: String,
}

/// One export holding all three kinds, told apart by the `kind` column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixedRow {
    pub kind: String,
    pub id: String,
    #[serde(alias = "assigned_to", alias = "doer_name")]
    pub doer: String,
    pub status: String,
    pub planned_date: String,
    pub planned_time: String,
    pub actual_date: String,
    pub actual_time: String,
    pub planned: String,
    pub actual: String,
}

impl From<MixedRow> for DelegationRow {
    fn from(r: MixedRow) -> Self {
        Self {
            id: r.id,
            doer: r.doer,
            status: r.status,
            planned_date: r.planned_date,
            planned_time: r.planned_time,
            actual_date: r.actual_date,
            actual_time: r.actual_time,
        }
    }
}

impl From<MixedRow> for ChecklistRow {
    fn from(r: MixedRow) -> Self {
        Self {
            id: r.id,
            doer: r.doer,
            status: r.status,
            task_date: r.planned_date,
            planned_time: r.planned_time,
            actual_date: r.actual_date,
            actual_time: r.actual_time,
        }
    }
}

impl From<MixedRow> for FmsRow {
    fn from(r: MixedRow) -> Self {
        // Mixed exports may split fms cells into date/time columns instead.
        let join = |cell: String, date: String, time: String| {
            if cell.trim().is_empty() {
                format!("{} {}", date.trim(), time.trim()).trim().to_string()
            } else {
                cell
            }
        };
        Self {
            id: r.id,
            doer: r.doer,
            status: r.status,
            planned: join(r.planned, r.planned_date, r.planned_time),
            actual: join(r.actual, r.actual_date, r.actual_time),
        }
    }
}
