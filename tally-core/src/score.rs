//! Performance score and alert tiers.
//!
//! Scoring:
//! - converted metric = 100 - |metric| for WND and WND-on-time
//! - with an RQC quality score: mean of the two converted metrics and RQC
//! - without one: mean of the two converted metrics

use serde::{Deserialize, Serialize};

use crate::stats::WindowStats;

/// Bounded 0..=100 score.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64")]
pub struct PerformanceScore(f64);

impl PerformanceScore {
    pub fn new(score: f64) -> Self {
        Self(score.clamp(0.0, 100.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<f64> for PerformanceScore {
    fn from(score: f64) -> Self {
        Self::new(score)
    }
}

/// RQC values of zero or below mean "no quality score available".
pub fn effective_rqc(rqc: Option<f64>) -> Option<f64> {
    rqc.filter(|r| *r > 0.0).map(|r| r.min(100.0))
}

pub fn score(stats: &WindowStats, rqc: Option<f64>) -> PerformanceScore {
    let converted_wnd = 100.0 - stats.wnd.abs();
    let converted_wnd_on_time = 100.0 - stats.wnd_on_time.abs();

    let raw = match effective_rqc(rqc) {
        Some(rqc) => (converted_wnd + converted_wnd_on_time + rqc) / 3.0,
        None => (converted_wnd + converted_wnd_on_time) / 2.0,
    };
    PerformanceScore::new(raw)
}

/// Dashboard colouring for a signed percentage such as WND.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertTier {
    Grey,
    Orange,
    Red,
}

impl AlertTier {
    /// Red at -20.6 and below, orange at -10.6 and below, grey otherwise.
    /// Compared on the raw value; never round first.
    pub fn for_value(v: f64) -> Self {
        if v <= -20.6 {
            AlertTier::Red
        } else if v <= -10.6 {
            AlertTier::Orange
        } else {
            AlertTier::Grey
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertTier::Grey => "grey",
            AlertTier::Orange => "orange",
            AlertTier::Red => "red",
        }
    }
}
