//! Status classifier: one task + an injected "now" -> exactly one state.
//!
//! Rules, first match wins:
//! 1. completed                      -> Completed
//! 2. shifted, deadline passed       -> ShiftedDelayed
//!    shifted, deadline not passed   -> ShiftedOk
//! 3. anything else, deadline passed -> Delayed
//!    otherwise                      -> Pending
//!
//! A task without a usable planned date never counts as overdue.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Pending,
    Delayed,
    Completed,
    ShiftedOk,
    ShiftedDelayed,
}

/// Flags consumed by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub state: TaskState,
    pub is_pending: bool,
    pub is_delayed: bool,
    pub is_completed: bool,
    pub is_shifted_not_delayed: bool,
    /// Completed, with the recorded finish after the deadline.
    pub completed_late: bool,
}

impl Classification {
    fn from_state(state: TaskState) -> Self {
        Self {
            state,
            is_pending: state == TaskState::Pending,
            is_delayed: matches!(state, TaskState::Delayed | TaskState::ShiftedDelayed),
            is_completed: state == TaskState::Completed,
            is_shifted_not_delayed: state == TaskState::ShiftedOk,
            completed_late: false,
        }
    }
}

fn is_overdue(task: &Task, now: NaiveDateTime) -> bool {
    match task.planned_datetime() {
        Some(deadline) => deadline < now,
        None => {
            tracing::debug!(task_id = %task.id, kind = %task.kind, "no planned date, not treated as overdue");
            false
        }
    }
}

pub fn classify(task: &Task, now: NaiveDateTime) -> Classification {
    match task.status {
        TaskStatus::Completed => {
            let mut c = Classification::from_state(TaskState::Completed);
            match (task.actual_date, task.actual_datetime(), task.planned_datetime()) {
                (_, Some(actual), Some(deadline)) => c.completed_late = actual > deadline,
                (Some(finished), None, Some(deadline)) => {
                    // Only the day is known; late means a later day.
                    tracing::debug!(task_id = %task.id, kind = %task.kind, "completed task has no actual time");
                    c.completed_late = finished > deadline.date();
                }
                (None, _, _) => {
                    tracing::warn!(
                        task_id = %task.id,
                        kind = %task.kind,
                        "completed task has no actual date recorded"
                    );
                }
                _ => {}
            }
            c
        }
        TaskStatus::Shifted => {
            if is_overdue(task, now) {
                Classification::from_state(TaskState::ShiftedDelayed)
            } else {
                Classification::from_state(TaskState::ShiftedOk)
            }
        }
        TaskStatus::Pending | TaskStatus::NotDone | TaskStatus::CanNotBeDone => {
            if is_overdue(task, now) {
                Classification::from_state(TaskState::Delayed)
            } else {
                Classification::from_state(TaskState::Pending)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskKind;
    use chrono::{NaiveDate, NaiveTime};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn now() -> NaiveDateTime {
        day(2024, 1, 15).and_time(hms(12, 0, 0))
    }

    fn exactly_one_primary(c: &Classification) -> bool {
        let primaries = [
            c.is_completed,
            c.is_pending,
            c.is_delayed,
            c.is_shifted_not_delayed,
        ];
        primaries.iter().filter(|f| **f).count() == 1
    }

    #[test]
    fn pending_past_deadline_is_delayed() {
        let t = Task::new("d1", TaskKind::Delegation).with_planned(day(2024, 1, 14), None);
        let c = classify(&t, now());
        assert_eq!(c.state, TaskState::Delayed);
        assert!(c.is_delayed);
        assert!(!c.is_pending);
    }

    #[test]
    fn pending_due_later_today_is_pending() {
        let t = Task::new("d2", TaskKind::Delegation).with_planned(day(2024, 1, 15), None);
        let c = classify(&t, now());
        assert_eq!(c.state, TaskState::Pending);
        assert!(c.is_pending);
    }

    #[test]
    fn explicit_planned_time_earlier_today_is_delayed() {
        let t = Task::new("d3", TaskKind::Delegation)
            .with_planned(day(2024, 1, 15), Some(hms(10, 0, 0)));
        assert_eq!(classify(&t, now()).state, TaskState::Delayed);
    }

    #[test]
    fn deadline_equal_to_now_is_not_delayed() {
        let t = Task::new("d4", TaskKind::Delegation)
            .with_planned(day(2024, 1, 15), Some(hms(12, 0, 0)));
        assert_eq!(classify(&t, now()).state, TaskState::Pending);
    }

    #[test]
    fn shifted_to_tomorrow_is_shifted_ok() {
        let t = Task::new("d5", TaskKind::Delegation)
            .with_status(TaskStatus::Shifted)
            .with_planned(day(2024, 1, 16), None);
        let c = classify(&t, now());
        assert_eq!(c.state, TaskState::ShiftedOk);
        assert!(c.is_shifted_not_delayed);
        assert!(!c.is_pending);
        assert!(!c.is_delayed);
    }

    #[test]
    fn shifted_but_overdue_counts_as_delayed() {
        let t = Task::new("d6", TaskKind::Delegation)
            .with_status(TaskStatus::from_raw("🔁"))
            .with_planned(day(2024, 1, 10), None);
        let c = classify(&t, now());
        assert_eq!(c.state, TaskState::ShiftedDelayed);
        assert!(c.is_delayed);
        assert!(!c.is_shifted_not_delayed);
    }

    #[test]
    fn not_done_and_can_not_be_done_follow_deadline() {
        let overdue = Task::new("c1", TaskKind::Checklist)
            .with_status(TaskStatus::NotDone)
            .with_planned(day(2024, 1, 1), None);
        assert_eq!(classify(&overdue, now()).state, TaskState::Delayed);

        let upcoming = Task::new("c2", TaskKind::Checklist)
            .with_status(TaskStatus::CanNotBeDone)
            .with_planned(day(2024, 2, 1), None);
        assert_eq!(classify(&upcoming, now()).state, TaskState::Pending);
    }

    #[test]
    fn completed_is_terminal_even_when_deadline_passed() {
        let t = Task::new("f1", TaskKind::Fms)
            .with_status(TaskStatus::Completed)
            .with_planned(day(2024, 1, 1), Some(hms(10, 0, 0)))
            .with_actual(day(2024, 1, 3), Some(hms(9, 0, 0)));
        let c = classify(&t, now());
        assert_eq!(c.state, TaskState::Completed);
        assert!(c.completed_late);
    }

    #[test]
    fn completed_before_deadline_is_not_late() {
        let t = Task::new("f2", TaskKind::Fms)
            .with_status(TaskStatus::Completed)
            .with_planned(day(2024, 1, 10), None)
            .with_actual(day(2024, 1, 10), Some(hms(18, 0, 0)));
        let c = classify(&t, now());
        assert!(c.is_completed);
        assert!(!c.completed_late);
    }

    #[test]
    fn completed_with_day_only_is_judged_by_day() {
        let same_day = Task::new("t", TaskKind::Delegation)
            .with_status(TaskStatus::Completed)
            .with_planned(day(2024, 1, 10), Some(hms(9, 0, 0)))
            .with_actual(day(2024, 1, 10), None);
        let c = classify(&same_day, now());
        assert!(c.is_completed);
        assert!(!c.completed_late);

        let next_day = same_day.clone().with_actual(day(2024, 1, 11), None);
        assert!(classify(&next_day, now()).completed_late);

        let no_actual = Task::new("u", TaskKind::Delegation)
            .with_status(TaskStatus::Completed)
            .with_planned(day(2024, 1, 10), None);
        let c = classify(&no_actual, now());
        assert!(c.is_completed);
        assert!(!c.completed_late);
    }

    #[test]
    fn missing_planned_date_degrades_to_not_delayed() {
        let pending = Task::new("x1", TaskKind::Delegation);
        assert_eq!(classify(&pending, now()).state, TaskState::Pending);

        let shifted = Task::new("x2", TaskKind::Delegation).with_status(TaskStatus::Shifted);
        assert_eq!(classify(&shifted, now()).state, TaskState::ShiftedOk);
    }

    #[test]
    fn every_status_yields_exactly_one_primary_state() {
        let statuses = [
            TaskStatus::Pending,
            TaskStatus::Completed,
            TaskStatus::NotDone,
            TaskStatus::CanNotBeDone,
            TaskStatus::Shifted,
        ];
        let planned = [None, Some(day(2024, 1, 1)), Some(day(2024, 1, 15)), Some(day(2024, 3, 1))];

        for status in statuses {
            for p in planned {
                let mut t = Task::new("p", TaskKind::Delegation).with_status(status);
                t.planned_date = p;
                let c = classify(&t, now());
                assert!(exactly_one_primary(&c), "{status:?} {p:?} -> {c:?}");
            }
        }
    }
}
