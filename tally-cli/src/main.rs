use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::collections::HashMap;
use std::path::PathBuf;
use tally_core::{RangePolicy, ReportWindow, rank_team};
use tally_ingest::TaskSources;

mod config;
mod logging;
mod report;

use config::{init_config, load_config};
use report::{
    freeze_week, load_inputs, print_summary, print_team, print_trend, read_rqc_file, summarize,
    team_stats, weekly,
};

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Task classification and performance scoring")]
struct Cli {
    /// Config file (default: ~/.tally/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone, Default)]
struct SourceArgs {
    /// Delegation task export (CSV)
    #[arg(long)]
    delegation: Option<PathBuf>,

    /// Checklist subtask export (CSV)
    #[arg(long)]
    checklist: Option<PathBuf>,

    /// FMS task export (CSV)
    #[arg(long)]
    fms: Option<PathBuf>,

    /// Combined export with a `kind` column
    #[arg(long)]
    mixed: Option<PathBuf>,

    /// Evaluate as of this local time instead of the clock, e.g. "2024-01-15 12:00"
    #[arg(long)]
    now: Option<String>,

    /// Date-range membership rule (default: from config)
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,
}

impl SourceArgs {
    fn sources(&self) -> TaskSources {
        TaskSources {
            delegation: self.delegation.clone(),
            checklist: self.checklist.clone(),
            fms: self.fms.clone(),
            mixed: self.mixed.clone(),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum PolicyArg {
    PlannedOrActual,
    PlannedOnly,
}

impl From<PolicyArg> for RangePolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::PlannedOrActual => RangePolicy::PlannedOrActual,
            PolicyArg::PlannedOnly => RangePolicy::PlannedOnly,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Single-window summary for one user (or everyone)
    Report {
        #[command(flatten)]
        src: SourceArgs,

        #[arg(long)]
        user: Option<String>,

        #[arg(long)]
        from: Option<NaiveDate>,

        #[arg(long)]
        to: Option<NaiveDate>,

        /// Externally computed quality score (0-100); 0 means none
        #[arg(long)]
        rqc: Option<f64>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Weekly WND / WND-on-time series
    Trend {
        #[command(flatten)]
        src: SourceArgs,

        #[arg(long)]
        user: Option<String>,

        /// Number of trailing weeks (default: config trend_weeks)
        #[arg(long)]
        weeks: Option<usize>,

        #[arg(long)]
        rqc: Option<f64>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Rank every assignee by performance score
    Team {
        #[command(flatten)]
        src: SourceArgs,

        #[arg(long)]
        from: Option<NaiveDate>,

        #[arg(long)]
        to: Option<NaiveDate>,

        /// CSV with `user,rqc` columns
        #[arg(long)]
        rqc_file: Option<PathBuf>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print a frozen weekly record (JSON) for one user
    Freeze {
        #[command(flatten)]
        src: SourceArgs,

        #[arg(long)]
        user: String,

        /// Any day inside the week to freeze
        #[arg(long)]
        week_of: NaiveDate,

        #[arg(long)]
        rqc: Option<f64>,
    },

    /// Manage ~/.tally/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Report { src, user, from, to, rqc, json } => {
            let inputs = load_inputs(&src.sources(), src.now.as_deref(), src.policy.map(Into::into), &cfg)?;
            let window = ReportWindow::new(from, to)?;
            let summary = summarize(&inputs, user.as_deref(), &window, rqc);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }

        Command::Trend { src, user, weeks, rqc, json } => {
            let inputs = load_inputs(&src.sources(), src.now.as_deref(), src.policy.map(Into::into), &cfg)?;
            let weeks = weeks.unwrap_or(cfg.trend_weeks);
            let points = weekly(&inputs, user.as_deref(), weeks, rqc, &cfg)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                print_trend(user.as_deref(), &points);
            }
        }

        Command::Team { src, from, to, rqc_file, json } => {
            let inputs = load_inputs(&src.sources(), src.now.as_deref(), src.policy.map(Into::into), &cfg)?;
            let window = ReportWindow::new(from, to)?;
            let rqc = match rqc_file {
                Some(p) => read_rqc_file(&p)?,
                None => HashMap::new(),
            };

            let by_user = team_stats(&inputs, window).await?;
            let board = rank_team(&by_user, &rqc);
            if json {
                println!("{}", serde_json::to_string_pretty(&board)?);
            } else {
                print_team(&board);
            }
        }

        Command::Freeze { src, user, week_of, rqc } => {
            let inputs = load_inputs(&src.sources(), src.now.as_deref(), src.policy.map(Into::into), &cfg)?;
            let frozen = freeze_week(&inputs, &user, week_of, rqc, &cfg)?;
            println!("{}", serde_json::to_string_pretty(&frozen)?);
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                let s = toml::to_string_pretty(&cfg).context("serialize config")?;
                println!("{s}");
            }
        },
    }

    Ok(())
}
