//! Time utilities: injected clock conversion and week boundaries.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Deadline used when a planned time is missing.
pub const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 59) {
    Some(t) => t,
    None => panic!("23:59:59 is a valid time"),
};

/// Convert an injected UTC instant into naive wall-clock time in an IANA zone
/// like "Asia/Kolkata".
pub fn local_now(tz: &str, utc: DateTime<Utc>) -> Result<NaiveDateTime, EngineError> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| EngineError::InvalidTimezone(tz.to_string()))?;
    Ok(utc.with_timezone(&tz).naive_local())
}

/// First day of a reporting week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    fn weekday(&self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }
}

/// Inclusive (first, last) days of the week containing `date`.
pub fn week_bounds(date: NaiveDate, start: WeekStart) -> (NaiveDate, NaiveDate) {
    let offset = (date.weekday().num_days_from_monday() + 7
        - start.weekday().num_days_from_monday())
        % 7;
    let first = date - Duration::days(i64::from(offset));
    (first, first + Duration::days(6))
}
