//! Weekly trend: the aggregator run over consecutive, non-overlapping weeks.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::stats::{WindowStats, aggregate};
use crate::task::Task;
use crate::time::{WeekStart, week_bounds};
use crate::window::{RangePolicy, ReportWindow};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeekTrend {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub stats: WindowStats,
}

/// The trailing `week_count` weeks, the last one containing `now`, earliest first.
pub fn trailing_weeks(
    week_count: usize,
    now: NaiveDateTime,
    week_start: WeekStart,
) -> Vec<(NaiveDate, NaiveDate)> {
    let (current_start, _) = week_bounds(now.date(), week_start);
    (0..week_count)
        .rev()
        .map(|back| {
            let first = current_start - Duration::weeks(back as i64);
            (first, first + Duration::days(6))
        })
        .collect()
}

/// Per-week stats for one user (or everyone when `user` is `None`).
pub fn trend(
    tasks: &[Task],
    user: Option<&str>,
    week_count: usize,
    now: NaiveDateTime,
    week_start: WeekStart,
    policy: RangePolicy,
) -> Result<Vec<WeekTrend>, EngineError> {
    if week_count == 0 {
        return Err(EngineError::ZeroWeeks);
    }

    let subject: Vec<&Task> = tasks
        .iter()
        .filter(|t| user.is_none_or(|u| t.is_assigned_to(u)))
        .collect();

    trailing_weeks(week_count, now, week_start)
        .into_iter()
        .map(|(first, last)| {
            let window = ReportWindow::closed(first, last)?;
            Ok(WeekTrend {
                week_start: first,
                week_end: last,
                stats: aggregate(subject.iter().copied(), &window, policy, now),
            })
        })
        .collect()
}
