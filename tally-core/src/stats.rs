//! Aggregation: fold classified, in-window tasks into one `WindowStats`.
//!
//! Every task in a call is classified against the same `now`, so a whole report
//! sees one consistent clock.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::classify::classify;
use crate::task::Task;
use crate::window::{RangePolicy, ReportWindow};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    pub total_tasks: u32,
    pub completed_tasks: u32,
    /// Completed with the recorded finish not after the deadline.
    pub completed_on_time: u32,
    pub completed_late: u32,
    pub current_pending: u32,
    /// Overdue and not completed, shifted-and-overdue included.
    pub current_delayed: u32,
    /// `current_delayed + completed_late`.
    pub all_delayed_tasks: u32,
    pub shifted_not_delayed: u32,
    /// Work Not Done: share of tasks not completed, as a percentage in [-100, 0].
    pub wnd: f64,
    /// Share of tasks past their deadline without completion, in [-100, 0].
    pub wnd_on_time: f64,
}

impl WindowStats {
    pub fn is_empty(&self) -> bool {
        self.total_tasks == 0
    }

    /// Completed share of the window, 0..=100.
    pub fn completion_rate(&self) -> f64 {
        if self.total_tasks == 0 {
            return 0.0;
        }
        100.0 * f64::from(self.completed_tasks) / f64::from(self.total_tasks)
    }

    fn finish(mut self) -> Self {
        self.all_delayed_tasks = self.current_delayed + self.completed_late;
        let not_done = self.current_pending + self.current_delayed + self.shifted_not_delayed;
        self.wnd = negative_percent(not_done, self.total_tasks);
        self.wnd_on_time = negative_percent(self.current_delayed, self.total_tasks);
        self
    }
}

/// `-100 * part / total`; an empty window is 0, never NaN.
fn negative_percent(part: u32, total: u32) -> f64 {
    if total == 0 || part == 0 {
        return 0.0;
    }
    -(100.0 * f64::from(part)) / f64::from(total)
}

pub fn aggregate<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    window: &ReportWindow,
    policy: RangePolicy,
    now: NaiveDateTime,
) -> WindowStats {
    let mut stats = WindowStats::default();

    for task in tasks {
        if !window.contains_task(task, policy) {
            continue;
        }
        let c = classify(task, now);

        stats.total_tasks += 1;
        if c.is_completed {
            stats.completed_tasks += 1;
            if c.completed_late {
                stats.completed_late += 1;
            } else {
                stats.completed_on_time += 1;
            }
        }
        if c.is_pending {
            stats.current_pending += 1;
        }
        if c.is_delayed {
            stats.current_delayed += 1;
        }
        if c.is_shifted_not_delayed {
            stats.shifted_not_delayed += 1;
        }
    }

    let stats = stats.finish();
    tracing::debug!(
        from = ?window.from_date(),
        to = ?window.to_date(),
        total = stats.total_tasks,
        wnd = stats.wnd,
        wnd_on_time = stats.wnd_on_time,
        "aggregated window"
    );
    stats
}

/// Organisation-wide stats over every task, assigned or not.
pub fn global_stats(
    tasks: &[Task],
    window: &ReportWindow,
    policy: RangePolicy,
    now: NaiveDateTime,
) -> WindowStats {
    aggregate(tasks, window, policy, now)
}

/// Stats for one assignee.
pub fn user_stats(
    tasks: &[Task],
    user: &str,
    window: &ReportWindow,
    policy: RangePolicy,
    now: NaiveDateTime,
) -> WindowStats {
    aggregate(tasks.iter().filter(|t| t.is_assigned_to(user)), window, policy, now)
}

/// One aggregate per assignee, ordered by name. Unassigned tasks are skipped.
pub fn stats_by_user(
    tasks: &[Task],
    window: &ReportWindow,
    policy: RangePolicy,
    now: NaiveDateTime,
) -> BTreeMap<String, WindowStats> {
    let mut groups: BTreeMap<&str, Vec<&Task>> = BTreeMap::new();
    for task in tasks {
        if let Some(user) = task.assignee.as_deref() {
            groups.entry(user).or_default().push(task);
        }
    }

    groups
        .into_iter()
        .map(|(user, group)| (user.to_string(), aggregate(group, window, policy, now)))
        .collect()
}
