//! Report commands: load exports, run the engine, print results.

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;
use tally_core::{
    AlertTier, FrozenWeek, PerformanceScore, RangePolicy, ReportWindow, Task, TeamMember, WeekTrend,
    WindowStats, effective_rqc, global_stats, local_now, score, trend, user_stats,
    week_bounds,
};
use tally_ingest::{DateParser, TaskSources, load_sources};

use crate::config::Config;

/// Everything a command needs before it can compute.
pub struct Inputs {
    pub tasks: Vec<Task>,
    pub now: NaiveDateTime,
    pub policy: RangePolicy,
}

pub fn load_inputs(
    sources: &TaskSources,
    now_override: Option<&str>,
    policy: Option<RangePolicy>,
    cfg: &Config,
) -> Result<Inputs> {
    if sources.is_empty() {
        bail!("no task exports given (pass --delegation, --checklist, --fms or --mixed)");
    }
    let tasks = load_sources(sources)?;
    let now = resolve_now(now_override, &cfg.timezone)?;
    tracing::debug!(%now, tz = %cfg.timezone, "report clock");

    Ok(Inputs {
        tasks,
        now,
        policy: policy.unwrap_or(cfg.range_policy),
    })
}

/// `--now` wins; otherwise wall-clock time in the configured zone.
pub fn resolve_now(now_override: Option<&str>, timezone: &str) -> Result<NaiveDateTime> {
    match now_override {
        Some(raw) => {
            let dates = DateParser::new()?;
            match dates.datetime(raw) {
                (Some(d), t) => Ok(d.and_time(t.unwrap_or(NaiveTime::MIN))),
                (None, _) => bail!("invalid --now value: {raw}"),
            }
        }
        None => Ok(local_now(timezone, Utc::now())?),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub user: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub now: NaiveDateTime,
    pub stats: WindowStats,
    pub rqc: Option<f64>,
    pub score: PerformanceScore,
    pub wnd_tier: AlertTier,
    pub wnd_on_time_tier: AlertTier,
}

pub fn summarize(
    inputs: &Inputs,
    user: Option<&str>,
    window: &ReportWindow,
    rqc: Option<f64>,
) -> Summary {
    let stats = match user {
        Some(u) => user_stats(&inputs.tasks, u, window, inputs.policy, inputs.now),
        None => global_stats(&inputs.tasks, window, inputs.policy, inputs.now),
    };
    let rqc = effective_rqc(rqc);

    Summary {
        user: user.map(str::to_string),
        from: window.from_date(),
        to: window.to_date(),
        now: inputs.now,
        stats,
        rqc,
        score: score(&stats, rqc),
        wnd_tier: AlertTier::for_value(stats.wnd),
        wnd_on_time_tier: AlertTier::for_value(stats.wnd_on_time),
    }
}

pub fn print_summary(s: &Summary) {
    let who = s.user.as_deref().unwrap_or("everyone");
    let range = match (s.from, s.to) {
        (Some(f), Some(t)) => format!("{f} .. {t}"),
        _ => "all dates".to_string(),
    };

    println!("# Performance: {who} ({range})\n");
    println!("Total tasks:          {}", s.stats.total_tasks);
    println!(
        "Completed:            {} (on time {}, late {})",
        s.stats.completed_tasks, s.stats.completed_on_time, s.stats.completed_late
    );
    println!("Pending:              {}", s.stats.current_pending);
    println!("Delayed:              {}", s.stats.current_delayed);
    println!("All delayed:          {}", s.stats.all_delayed_tasks);
    println!("Shifted (not late):   {}", s.stats.shifted_not_delayed);
    println!();
    println!("WND:                  {:.2}% [{}]", s.stats.wnd, s.wnd_tier.as_str());
    println!(
        "WND on time:          {:.2}% [{}]",
        s.stats.wnd_on_time,
        s.wnd_on_time_tier.as_str()
    );
    match s.rqc {
        Some(r) => println!("RQC:                  {r:.2}"),
        None => println!("RQC:                  (none)"),
    }
    println!("Score:                {:.2}", s.score.value());
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    #[serde(flatten)]
    pub week: WeekTrend,
    pub score: PerformanceScore,
}

pub fn weekly(
    inputs: &Inputs,
    user: Option<&str>,
    weeks: usize,
    rqc: Option<f64>,
    cfg: &Config,
) -> Result<Vec<TrendPoint>> {
    let series = trend(&inputs.tasks, user, weeks, inputs.now, cfg.week_start, inputs.policy)?;
    Ok(series
        .into_iter()
        .map(|week| TrendPoint {
            score: score(&week.stats, rqc),
            week,
        })
        .collect())
}

pub fn print_trend(user: Option<&str>, points: &[TrendPoint]) {
    println!("# Weekly trend: {}\n", user.unwrap_or("everyone"));
    println!("{:<12} {:<12} {:>6} {:>9} {:>12} {:>7}", "from", "to", "tasks", "wnd", "wnd_on_time", "score");
    for p in points {
        println!(
            "{:<12} {:<12} {:>6} {:>8.2}% {:>11.2}% {:>7.2}",
            p.week.week_start.to_string(),
            p.week.week_end.to_string(),
            p.week.stats.total_tasks,
            p.week.stats.wnd,
            p.week.stats.wnd_on_time,
            p.score.value()
        );
    }
}

/// Per-user aggregation, one blocking job per user.
pub async fn team_stats(inputs: &Inputs, window: ReportWindow) -> Result<BTreeMap<String, WindowStats>> {
    let users: BTreeSet<String> = inputs
        .tasks
        .iter()
        .filter_map(|t| t.assignee.clone())
        .collect();

    let tasks = Arc::new(inputs.tasks.clone());
    let mut jobs = tokio::task::JoinSet::new();
    for user in users {
        let tasks = Arc::clone(&tasks);
        let (policy, now) = (inputs.policy, inputs.now);
        jobs.spawn_blocking(move || {
            let stats = user_stats(&tasks, &user, &window, policy, now);
            (user, stats)
        });
    }

    let mut out = BTreeMap::new();
    while let Some(joined) = jobs.join_next().await {
        let (user, stats) = joined.context("team aggregation task panicked")?;
        out.insert(user, stats);
    }
    Ok(out)
}

#[derive(Debug, Deserialize)]
struct RqcRow {
    user: String,
    rqc: f64,
}

/// `user,rqc` CSV of externally computed quality scores.
pub fn read_rqc_file(path: &Path) -> Result<HashMap<String, f64>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut out = HashMap::new();
    for result in rdr.deserialize() {
        let row: RqcRow = result.with_context(|| format!("parsing {}", path.display()))?;
        out.insert(row.user, row.rqc);
    }
    Ok(out)
}

pub fn print_team(members: &[TeamMember]) {
    println!("# Team performance\n");
    println!("{:>4} {:<20} {:>6} {:>9} {:>12} {:>7}", "rank", "user", "tasks", "wnd", "wnd_on_time", "score");
    for m in members {
        println!(
            "{:>4} {:<20} {:>6} {:>8.2}% {:>11.2}% {:>7.2}  {}/{}",
            m.rank,
            m.user,
            m.stats.total_tasks,
            m.stats.wnd,
            m.stats.wnd_on_time,
            m.score.value(),
            m.wnd_tier.as_str(),
            m.wnd_on_time_tier.as_str()
        );
    }
}

/// Stats for the week containing `week_of`, packaged as a frozen record.
pub fn freeze_week(
    inputs: &Inputs,
    user: &str,
    week_of: NaiveDate,
    rqc: Option<f64>,
    cfg: &Config,
) -> Result<FrozenWeek> {
    let (first, last) = week_bounds(week_of, cfg.week_start);
    let window = ReportWindow::closed(first, last)?;
    let week = WeekTrend {
        week_start: first,
        week_end: last,
        stats: user_stats(&inputs.tasks, user, &window, inputs.policy, inputs.now),
    };

    if !FrozenWeek::is_closed(&week, inputs.now) {
        tracing::warn!(%first, %last, "week has not finished yet; snapshot may still change");
    }
    Ok(FrozenWeek::freeze(user, &week, rqc, inputs.now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tally_core::{TaskKind, TaskStatus, rank_team};

    fn inputs() -> Inputs {
        let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
        let tasks = vec![
            Task::new("1", TaskKind::Delegation)
                .with_assignee("asha")
                .with_status(TaskStatus::Completed)
                .with_planned(d(1, 9), None)
                .with_actual(d(1, 9), NaiveTime::from_hms_opt(9, 0, 0)),
            Task::new("2", TaskKind::Delegation)
                .with_assignee("asha")
                .with_planned(d(1, 10), None),
            Task::new("3", TaskKind::Checklist)
                .with_assignee("bala")
                .with_planned(d(1, 16), None),
            Task::new("4", TaskKind::Checklist)
                .with_assignee("bala")
                .with_status(TaskStatus::Completed)
                .with_planned(d(1, 16), None)
                .with_actual(d(1, 15), NaiveTime::from_hms_opt(10, 0, 0)),
        ];
        Inputs {
            tasks,
            now: resolve_now(Some("2024-01-15 12:00"), "Asia/Kolkata").unwrap(),
            policy: RangePolicy::PlannedOrActual,
        }
    }

    #[test]
    fn resolve_now_parses_override() {
        let now = resolve_now(Some("2024-01-15"), "UTC").unwrap();
        assert_eq!(now.to_string(), "2024-01-15 00:00:00");
        assert!(resolve_now(Some("yesterday"), "UTC").is_err());
    }

    #[test]
    fn summary_for_user_and_everyone() {
        let inputs = inputs();
        let s = summarize(&inputs, Some("asha"), &ReportWindow::unbounded(), None);
        assert_eq!(s.stats.total_tasks, 2);
        assert_eq!(s.stats.wnd, -50.0);
        assert_eq!(s.score.value(), 50.0);
        assert_eq!(s.wnd_tier, AlertTier::Red);

        let all = summarize(&inputs, None, &ReportWindow::unbounded(), Some(0.0));
        assert_eq!(all.stats.total_tasks, 4);
        assert_eq!(all.rqc, None);
    }

    #[tokio::test]
    async fn team_stats_covers_every_assignee() {
        let inputs = inputs();
        let by_user = team_stats(&inputs, ReportWindow::unbounded()).await.unwrap();
        assert_eq!(by_user.len(), 2);
        assert_eq!(by_user["bala"].current_pending, 1);

        let board = rank_team(&by_user, &HashMap::new());
        // bala: half done, nothing overdue; asha: half done, half overdue
        assert_eq!(board[0].user, "bala");
        assert_eq!(board[0].score.value(), 75.0);
        assert_eq!(board[1].user, "asha");
        assert_eq!(board[1].score.value(), 50.0);
    }

    #[test]
    fn rqc_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("rqc.csv");
        let mut f = std::fs::File::create(&p).unwrap();
        writeln!(f, "user,rqc").unwrap();
        writeln!(f, "asha, 88.5").unwrap();

        let rqc = read_rqc_file(&p).unwrap();
        assert_eq!(rqc.get("asha"), Some(&88.5));
    }

    #[test]
    fn freeze_uses_configured_week() {
        let inputs = inputs();
        let frozen = freeze_week(
            &inputs,
            "asha",
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            Some(90.0),
            &Config::default(),
        )
        .unwrap();
        assert_eq!(frozen.week_start, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!(frozen.stats.total_tasks, 2);
        assert_eq!(frozen.rqc, Some(90.0));
    }

    #[test]
    fn weekly_scores_each_point() {
        let inputs = inputs();
        let points = weekly(&inputs, Some("asha"), 2, None, &Config::default()).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].week.stats.total_tasks, 2);
        assert_eq!(points[1].score.value(), 100.0);
    }
}
