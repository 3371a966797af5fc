//! Frozen weekly record: an immutable value a storage layer may persist so
//! historical reports stop moving once a week is closed.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::score::{PerformanceScore, effective_rqc, score};
use crate::stats::WindowStats;
use crate::trend::WeekTrend;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrozenWeek {
    pub user: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub stats: WindowStats,
    pub rqc: Option<f64>,
    pub score: PerformanceScore,
    pub frozen_at: NaiveDateTime,
}

impl FrozenWeek {
    pub fn freeze(
        user: impl Into<String>,
        week: &WeekTrend,
        rqc: Option<f64>,
        now: NaiveDateTime,
    ) -> Self {
        let rqc = effective_rqc(rqc);
        Self {
            user: user.into(),
            week_start: week.week_start,
            week_end: week.week_end,
            stats: week.stats,
            rqc,
            score: score(&week.stats, rqc),
            frozen_at: now,
        }
    }

    /// A week is only safe to freeze once it has fully elapsed.
    pub fn is_closed(week: &WeekTrend, now: NaiveDateTime) -> bool {
        week.week_end < now.date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn week() -> WeekTrend {
        WeekTrend {
            week_start: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            week_end: NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(),
            stats: WindowStats {
                total_tasks: 10,
                completed_tasks: 7,
                completed_on_time: 7,
                current_pending: 1,
                current_delayed: 2,
                all_delayed_tasks: 2,
                wnd: -30.0,
                wnd_on_time: -20.0,
                ..Default::default()
            },
        }
    }

    fn at(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(0, 0, 1).unwrap())
    }

    #[test]
    fn freeze_carries_score_and_survives_json() {
        let frozen = FrozenWeek::freeze("asha", &week(), None, at(15));
        assert_eq!(frozen.score.value(), 75.0);
        assert_eq!(frozen.rqc, None);

        let json = serde_json::to_string(&frozen).unwrap();
        let back: FrozenWeek = serde_json::from_str(&json).unwrap();
        assert_eq!(back, frozen);
        assert!(json.contains("\"week_start\":\"2024-01-08\""));
    }

    #[test]
    fn only_elapsed_weeks_are_closed() {
        assert!(!FrozenWeek::is_closed(&week(), at(14)));
        assert!(FrozenWeek::is_closed(&week(), at(15)));
    }
}
