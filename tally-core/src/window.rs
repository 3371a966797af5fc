//! Reporting windows and date-range membership.
//!
//! Default membership is planned-or-actual: a task belongs to `[from, to]` if
//! its planned day OR its actual day falls inside. That means a task planned in
//! February but finished in January shows up in a January report, and one task
//! can land in several disjoint windows. `RangePolicy::PlannedOnly` is there for
//! callers that want the stricter reading.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::task::Task;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicy {
    #[default]
    PlannedOrActual,
    PlannedOnly,
}

/// Inclusive calendar-day window. Either bound missing means "no filtering".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct ReportWindow {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct WindowBounds {
    #[serde(default)]
    from: Option<NaiveDate>,
    #[serde(default)]
    to: Option<NaiveDate>,
}

impl TryFrom<WindowBounds> for ReportWindow {
    type Error = EngineError;

    fn try_from(b: WindowBounds) -> Result<Self, Self::Error> {
        Self::new(b.from, b.to)
    }
}

impl ReportWindow {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self, EngineError> {
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err(EngineError::InvertedWindow { from: f, to: t });
            }
        }
        Ok(Self { from, to })
    }

    pub fn closed(from: NaiveDate, to: NaiveDate) -> Result<Self, EngineError> {
        Self::new(Some(from), Some(to))
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn from_date(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn to_date(&self) -> Option<NaiveDate> {
        self.to
    }

    pub fn contains_task(&self, task: &Task, policy: RangePolicy) -> bool {
        let actual = match policy {
            RangePolicy::PlannedOrActual => task.actual_date,
            RangePolicy::PlannedOnly => None,
        };
        in_range(task.planned_date, actual, self.from, self.to)
    }
}

/// True if either date falls inside `[from, to]`, or if the window is open.
pub fn in_range(
    planned_date: Option<NaiveDate>,
    actual_date: Option<NaiveDate>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> bool {
    let (Some(from), Some(to)) = (from, to) else {
        return true;
    };
    let inside = |d: Option<NaiveDate>| d.is_some_and(|d| from <= d && d <= to);
    inside(planned_date) || inside(actual_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskKind;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn open_window_includes_everything() {
        assert!(in_range(None, None, None, None));
        assert!(in_range(Some(day(1999, 1, 1)), None, None, None));
        assert!(in_range(None, None, Some(day(2024, 1, 1)), None));
        assert!(in_range(None, Some(day(2030, 1, 1)), None, Some(day(2024, 1, 1))));
    }

    #[test]
    fn single_day_window_is_reflexive() {
        let d = day(2024, 1, 10);
        assert!(in_range(Some(d), None, Some(d), Some(d)));
    }

    #[test]
    fn bounds_are_inclusive() {
        let (f, t) = (day(2024, 1, 1), day(2024, 1, 31));
        assert!(in_range(Some(f), None, Some(f), Some(t)));
        assert!(in_range(Some(t), None, Some(f), Some(t)));
        assert!(!in_range(Some(day(2023, 12, 31)), None, Some(f), Some(t)));
        assert!(!in_range(Some(day(2024, 2, 1)), None, Some(f), Some(t)));
    }

    #[test]
    fn actual_date_in_window_is_enough() {
        let planned = day(2024, 2, 15);
        let actual = day(2024, 1, 20);
        assert!(in_range(Some(planned), Some(actual), Some(day(2024, 1, 1)), Some(day(2024, 1, 31))));
    }

    #[test]
    fn missing_dates_in_bounded_window_are_excluded() {
        assert!(!in_range(None, None, Some(day(2024, 1, 1)), Some(day(2024, 1, 31))));
    }

    #[test]
    fn planned_only_policy_ignores_actual_date() {
        let w = ReportWindow::closed(day(2024, 1, 1), day(2024, 1, 31)).unwrap();
        let t = Task::new("d1", TaskKind::Delegation)
            .with_planned(day(2024, 2, 15), None)
            .with_actual(day(2024, 1, 20), None);
        assert!(w.contains_task(&t, RangePolicy::PlannedOrActual));
        assert!(!w.contains_task(&t, RangePolicy::PlannedOnly));
    }

    #[test]
    fn deserialized_window_is_validated() {
        let ok: ReportWindow = serde_json::from_str(r#"{"from":"2024-01-01","to":"2024-01-31"}"#).unwrap();
        assert_eq!(ok.from_date(), Some(day(2024, 1, 1)));

        let open: ReportWindow = serde_json::from_str("{}").unwrap();
        assert_eq!(open, ReportWindow::unbounded());

        let err = serde_json::from_str::<ReportWindow>(r#"{"from":"2024-02-01","to":"2024-01-01"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn inverted_window_is_rejected() {
        let err = ReportWindow::closed(day(2024, 2, 1), day(2024, 1, 1)).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvertedWindow { from: day(2024, 2, 1), to: day(2024, 1, 1) }
        );
    }
}
