//! Tolerant date/time parsing for exported task rows.
//!
//! Accepted shapes:
//!   2024-01-05   2024/01/05   05/01/2024   05-01-2024   05.01.2024
//!   14:30        14:30:15     2:30 PM      02:30:15 am
//!   "<date> <time>" or "<date>T<time>" in combined cells
//!
//! Day-first is assumed for non-ISO dates. Blank cells and placeholders like
//! `0000-00-00` parse as `None`; anything else unparseable also becomes `None`
//! with a warning so the row still counts.

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

const PLACEHOLDERS: [&str; 5] = ["-", "null", "n/a", "na", "none"];

fn is_placeholder(s: &str) -> bool {
    s.is_empty()
        || s.starts_with("0000-00-00")
        || PLACEHOLDERS.iter().any(|p| s.eq_ignore_ascii_case(p))
}

#[derive(Debug, Clone)]
pub struct DateParser {
    ymd: Regex,
    dmy: Regex,
    time: Regex,
    combined: Regex,
}

impl DateParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            ymd: Regex::new(r"^(?P<y>\d{4})[-/](?P<m>\d{1,2})[-/](?P<d>\d{1,2})$")?,
            dmy: Regex::new(r"^(?P<d>\d{1,2})[-/.](?P<m>\d{1,2})[-/.](?P<y>\d{4})$")?,
            time: Regex::new(concat!(
                r"(?i)^(?P<h>\d{1,2}):(?P<m>\d{2})",
                r"(?::(?P<s>\d{2})(?:\.\d+)?)?",
                r"\s*(?P<ampm>am|pm)?$"
            ))?,
            combined: Regex::new(r"^(?P<date>\S+?)(?:[T\s]+(?P<time>.+))?$")?,
        })
    }

    pub fn date(&self, raw: &str) -> Option<NaiveDate> {
        let s = raw.trim();
        if is_placeholder(s) {
            return None;
        }

        let caps = self.ymd.captures(s).or_else(|| self.dmy.captures(s));
        let parsed = caps.and_then(|c| {
            let y: i32 = c["y"].parse().ok()?;
            let m: u32 = c["m"].parse().ok()?;
            let d: u32 = c["d"].parse().ok()?;
            NaiveDate::from_ymd_opt(y, m, d)
        });

        if parsed.is_none() {
            tracing::warn!(value = s, "unparseable date, treating as missing");
        }
        parsed
    }

    pub fn time(&self, raw: &str) -> Option<NaiveTime> {
        let s = raw.trim();
        if is_placeholder(s) {
            return None;
        }

        let parsed = self.time.captures(s).and_then(|c| {
            let mut h: u32 = c["h"].parse().ok()?;
            let m: u32 = c["m"].parse().ok()?;
            let sec: u32 = c.name("s").map_or(Some(0), |v| v.as_str().parse().ok())?;

            if let Some(ampm) = c.name("ampm") {
                if !(1..=12).contains(&h) {
                    return None;
                }
                let pm = ampm.as_str().eq_ignore_ascii_case("pm");
                h = match (h, pm) {
                    (12, false) => 0,
                    (12, true) => 12,
                    (h, true) => h + 12,
                    (h, false) => h,
                };
            }
            NaiveTime::from_hms_opt(h, m, sec)
        });

        if parsed.is_none() {
            tracing::warn!(value = s, "unparseable time, treating as missing");
        }
        parsed
    }

    /// Split a combined cell into its date and (optional) time.
    pub fn datetime(&self, raw: &str) -> (Option<NaiveDate>, Option<NaiveTime>) {
        let s = raw.trim();
        if is_placeholder(s) {
            return (None, None);
        }

        match self.combined.captures(s) {
            Some(c) => {
                let date = self.date(&c["date"]);
                let time = c.name("time").and_then(|t| self.time(t.as_str()));
                (date, time)
            }
            None => (None, None),
        }
    }
}
