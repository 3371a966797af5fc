//! Engine errors: caller contract violations only.
//!
//! Bad data (blank dates, odd status strings) never ends up here; it degrades
//! to documented defaults instead.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("report window is inverted: from={from} is after to={to}")]
    InvertedWindow { from: NaiveDate, to: NaiveDate },

    #[error("unknown task kind: {0:?} (expected delegation, checklist or fms)")]
    UnknownKind(String),

    #[error("trend needs at least one week")]
    ZeroWeeks,

    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),
}
