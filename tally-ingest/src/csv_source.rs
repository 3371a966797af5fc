//! Read CSV exports of the task tables into canonical tasks.
//!
//! Headers are required and matched by name; missing columns read as blank.

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::{Path, PathBuf};
use tally_core::{Task, TaskKind};

use crate::adapters::{normalize_checklist, normalize_delegation, normalize_fms};
use crate::dates::DateParser;
use crate::types::{ChecklistRow, DelegationRow, FmsRow, MixedRow};

fn read_rows<T: DeserializeOwned>(reader: impl Read) -> Result<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (i, result) in rdr.deserialize().enumerate() {
        // +2: one for the header, one for 1-based numbering
        let row: T = result.with_context(|| format!("reading row {}", i + 2))?;
        rows.push(row);
    }
    Ok(rows)
}

fn open(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))
}

pub fn read_delegation(reader: impl Read) -> Result<Vec<Task>> {
    let dates = DateParser::new()?;
    let rows: Vec<DelegationRow> = read_rows(reader)?;
    Ok(rows.iter().map(|r| normalize_delegation(r, &dates)).collect())
}

pub fn read_checklist(reader: impl Read) -> Result<Vec<Task>> {
    let dates = DateParser::new()?;
    let rows: Vec<ChecklistRow> = read_rows(reader)?;
    Ok(rows.iter().map(|r| normalize_checklist(r, &dates)).collect())
}

pub fn read_fms(reader: impl Read) -> Result<Vec<Task>> {
    let dates = DateParser::new()?;
    let rows: Vec<FmsRow> = read_rows(reader)?;
    Ok(rows.iter().map(|r| normalize_fms(r, &dates)).collect())
}

/// A combined export; every row must name its kind.
pub fn read_mixed(reader: impl Read) -> Result<Vec<Task>> {
    let dates = DateParser::new()?;
    let rows: Vec<MixedRow> = read_rows(reader)?;

    let mut out = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        let line = i + 2;
        if row.kind.trim().is_empty() {
            bail!("row {line} (id {:?}) has no kind", row.id);
        }
        let kind: TaskKind = row
            .kind
            .parse()
            .with_context(|| format!("row {line} (id {:?})", row.id))?;

        let task = match kind {
            TaskKind::Delegation => normalize_delegation(&row.into(), &dates),
            TaskKind::Checklist => normalize_checklist(&row.into(), &dates),
            TaskKind::Fms => normalize_fms(&row.into(), &dates),
        };
        out.push(task);
    }
    Ok(out)
}

pub fn read_delegation_csv(path: impl AsRef<Path>) -> Result<Vec<Task>> {
    let path = path.as_ref();
    read_delegation(open(path)?).with_context(|| format!("parsing {}", path.display()))
}

pub fn read_checklist_csv(path: impl AsRef<Path>) -> Result<Vec<Task>> {
    let path = path.as_ref();
    read_checklist(open(path)?).with_context(|| format!("parsing {}", path.display()))
}

pub fn read_fms_csv(path: impl AsRef<Path>) -> Result<Vec<Task>> {
    let path = path.as_ref();
    read_fms(open(path)?).with_context(|| format!("parsing {}", path.display()))
}

pub fn read_mixed_csv(path: impl AsRef<Path>) -> Result<Vec<Task>> {
    let path = path.as_ref();
    read_mixed(open(path)?).with_context(|| format!("parsing {}", path.display()))
}

/// Which exports to load. Any subset may be present.
#[derive(Debug, Clone, Default)]
pub struct TaskSources {
    pub delegation: Option<PathBuf>,
    pub checklist: Option<PathBuf>,
    pub fms: Option<PathBuf>,
    pub mixed: Option<PathBuf>,
}

impl TaskSources {
    pub fn is_empty(&self) -> bool {
        self.delegation.is_none()
            && self.checklist.is_none()
            && self.fms.is_none()
            && self.mixed.is_none()
    }
}

pub fn load_sources(sources: &TaskSources) -> Result<Vec<Task>> {
    let mut tasks = Vec::new();

    if let Some(p) = &sources.delegation {
        tasks.extend(read_delegation_csv(p)?);
    }
    if let Some(p) = &sources.checklist {
        tasks.extend(read_checklist_csv(p)?);
    }
    if let Some(p) = &sources.fms {
        tasks.extend(read_fms_csv(p)?);
    }
    if let Some(p) = &sources.mixed {
        tasks.extend(read_mixed_csv(p)?);
    }

    tracing::info!(count = tasks.len(), "loaded tasks");
    Ok(tasks)
}
