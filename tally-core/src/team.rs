//! Team ranking for the performance board.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::score::{AlertTier, PerformanceScore, effective_rqc, score};
use crate::stats::WindowStats;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    /// 1-based.
    pub rank: usize,
    pub user: String,
    pub stats: WindowStats,
    pub rqc: Option<f64>,
    pub score: PerformanceScore,
    pub wnd_tier: AlertTier,
    pub wnd_on_time_tier: AlertTier,
}

/// Score every user and sort best first. Equal scores are ordered by name.
pub fn rank_team(
    by_user: &BTreeMap<String, WindowStats>,
    rqc: &HashMap<String, f64>,
) -> Vec<TeamMember> {
    let mut members: Vec<TeamMember> = by_user
        .iter()
        .map(|(user, stats)| {
            let user_rqc = effective_rqc(rqc.get(user).copied());
            TeamMember {
                rank: 0,
                user: user.clone(),
                stats: *stats,
                rqc: user_rqc,
                score: score(stats, user_rqc),
                wnd_tier: AlertTier::for_value(stats.wnd),
                wnd_on_time_tier: AlertTier::for_value(stats.wnd_on_time),
            }
        })
        .collect();

    members.sort_by(|a, b| {
        b.score
            .value()
            .total_cmp(&a.score.value())
            .then_with(|| a.user.cmp(&b.user))
    });
    for (i, m) in members.iter_mut().enumerate() {
        m.rank = i + 1;
    }
    members
}
