use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tally_core::{RangePolicy, WeekStart};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// IANA zone the business runs in; "now" is taken as wall-clock time there.
    pub timezone: String,
    pub week_start: WeekStart,
    pub range_policy: RangePolicy,
    /// Weeks shown by `tally trend` when --weeks is not given.
    pub trend_weeks: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: "Asia/Kolkata".to_string(),
            week_start: WeekStart::Monday,
            range_policy: RangePolicy::PlannedOrActual,
            trend_weeks: 4,
        }
    }
}

/// `~/.tally`, created on first use.
fn tally_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    let dir = PathBuf::from(home).join(".tally");
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(tally_home()?.join("config.toml"))
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn load_config(override_path: Option<&Path>) -> Result<Config> {
    match override_path {
        Some(p) => load_config_from(p),
        None => load_config_from(&config_path()?),
    }
}

pub fn save_config(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config(override_path: Option<&Path>) -> Result<()> {
    let p = match override_path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
