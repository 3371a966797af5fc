//! Canonical task model shared by every reporting path.
//!
//! Rows from the three task tables (delegation, checklist, fms) are mapped into
//! this one shape by the adapters in `tally-ingest`, so nothing downstream has
//! to know which table a task came from.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;
use crate::time::END_OF_DAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Delegation,
    Checklist,
    Fms,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Delegation => "delegation",
            TaskKind::Checklist => "checklist",
            TaskKind::Fms => "fms",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "delegation" => Ok(TaskKind::Delegation),
            "checklist" => Ok(TaskKind::Checklist),
            "fms" => Ok(TaskKind::Fms),
            _ => Err(EngineError::UnknownKind(s.to_string())),
        }
    }
}

/// Closed status set. Raw strings are folded into this once, at normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Completed,
    NotDone,
    CanNotBeDone,
    Shifted,
}

/// Legacy marker some rows carry instead of the word "shifted".
pub const SHIFT_GLYPH: &str = "🔁";

impl TaskStatus {
    /// Map a stored status value to the closed set.
    ///
    /// Blank or unrecognised values become `Pending`.
    pub fn from_raw(raw: &str) -> Self {
        let s = raw.trim();
        if s.contains(SHIFT_GLYPH) {
            return TaskStatus::Shifted;
        }

        let lowered = s.to_lowercase();
        let collapsed: String = lowered
            .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        match collapsed.as_str() {
            "" | "pending" => TaskStatus::Pending,
            "completed" => TaskStatus::Completed,
            "not done" => TaskStatus::NotDone,
            "can not be done" | "cannot be done" => TaskStatus::CanNotBeDone,
            "shifted" => TaskStatus::Shifted,
            other => {
                tracing::debug!(status = other, "unrecognised task status, treating as pending");
                TaskStatus::Pending
            }
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    pub fn is_shifted(&self) -> bool {
        matches!(self, TaskStatus::Shifted)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique within its kind only.
    pub id: String,
    pub kind: TaskKind,

    /// Doer the task is assigned to, if the source row names one.
    pub assignee: Option<String>,

    pub status: TaskStatus,

    pub planned_date: Option<NaiveDate>,
    pub planned_time: Option<NaiveTime>,

    /// Set once the work is recorded as done.
    pub actual_date: Option<NaiveDate>,
    pub actual_time: Option<NaiveTime>,
}

impl Task {
    pub fn new(id: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            id: id.into(),
            kind,
            assignee: None,
            status: TaskStatus::Pending,
            planned_date: None,
            planned_time: None,
            actual_date: None,
            actual_time: None,
        }
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_planned(mut self, date: NaiveDate, time: Option<NaiveTime>) -> Self {
        self.planned_date = Some(date);
        self.planned_time = time;
        self
    }

    pub fn with_actual(mut self, date: NaiveDate, time: Option<NaiveTime>) -> Self {
        self.actual_date = Some(date);
        self.actual_time = time;
        self
    }

    /// Deadline; a missing planned time means end of the planned day.
    pub fn planned_datetime(&self) -> Option<NaiveDateTime> {
        self.planned_date
            .map(|d| d.and_time(self.planned_time.unwrap_or(END_OF_DAY)))
    }

    /// Only present when both actual fields are recorded.
    pub fn actual_datetime(&self) -> Option<NaiveDateTime> {
        match (self.actual_date, self.actual_time) {
            (Some(d), Some(t)) => Some(d.and_time(t)),
            _ => None,
        }
    }

    pub fn is_assigned_to(&self, user: &str) -> bool {
        self.assignee.as_deref() == Some(user)
    }
}
