//! Pitchside CLI Library
//!
//! File loading and command runners behind the `pitchside` binary.
//! Inputs are the JSON documents the storage layer exports (score
//! history, squad list, capture logs); outputs are JSON values.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use pitchside_core::live::{CaptureLog, LogStats, TacticalEvent};
use pitchside_core::models::SESSION_DATE_FORMAT;
use pitchside_core::scoring::{rank_subjects, seed_averages, summarize_subject, DateRange, PeriodFilter};
use pitchside_core::squad::select_squad;
use pitchside_core::{finalize, PendingWrite, ScoreRecord, SessionDescriptor, Subject, TrackerConfig, ViewingContext};

/// Read and decode a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON file: {}", path.display()))
}

pub fn load_history(path: &Path) -> Result<Vec<ScoreRecord>> {
    read_json(path)
}

pub fn load_subjects(path: &Path) -> Result<Vec<Subject>> {
    read_json(path)
}

/// A capture log file holds either a bare event list or a full `CaptureLog`.
pub fn load_events(path: &Path) -> Result<Vec<TacticalEvent>> {
    let value: serde_json::Value = read_json(path)?;
    if value.is_array() {
        return serde_json::from_value(value).context("Failed to decode event list");
    }
    let log: CaptureLog = serde_json::from_value(value).context("Failed to decode capture log")?;
    Ok(log.events().to_vec())
}

/// Explicit config file, else `PITCHSIDE_CONFIG_PATH`, else the default.
pub fn load_config(path: Option<&Path>) -> Result<TrackerConfig> {
    let config = match path {
        Some(path) => TrackerConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => TrackerConfig::from_env_or_default().context("Failed to load config from environment")?,
    };
    Ok(config)
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, SESSION_DATE_FORMAT)
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", value))
}

/// Period from its CLI name. `custom` takes `from` and an optional `to`.
pub fn parse_period(name: &str, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<PeriodFilter> {
    let period = match name {
        "all" => PeriodFilter::All,
        "today" => PeriodFilter::Today,
        "last7days" => PeriodFilter::Last7Days,
        "last30days" => PeriodFilter::Last30Days,
        "thisYear" | "this-year" => PeriodFilter::ThisYear,
        "custom" => PeriodFilter::Custom {
            range: from.map(|start| match to {
                Some(end) => DateRange::between(start, end),
                None => DateRange::single(start),
            }),
        },
        other => bail!("Unknown period '{}'", other),
    };
    Ok(period)
}

pub fn run_summary(
    subject_id: &str,
    history: &[ScoreRecord],
    ctx: &ViewingContext,
    config: &TrackerConfig,
) -> Result<serde_json::Value> {
    let summary = summarize_subject(subject_id, history, ctx, config);
    if !summary.has_data() {
        tracing::warn!("No records for {} in the selected period", subject_id);
    }
    Ok(serde_json::to_value(summary)?)
}

pub fn run_ranking(subjects: &[Subject], history: &[ScoreRecord], ctx: &ViewingContext) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(rank_subjects(subjects, history, ctx))?)
}

pub fn run_squad(subjects: &[Subject], history: &[ScoreRecord], ctx: &ViewingContext) -> Result<serde_json::Value> {
    let ranked = rank_subjects(subjects, history, ctx);
    let squad = select_squad(&ranked, ctx);
    tracing::info!("Best XI: {}/{} slots filled", squad.filled_count(), squad.slots.len());
    Ok(serde_json::to_value(squad)?)
}

pub fn run_seed(subject_id: &str, history: &[ScoreRecord], config: &TrackerConfig) -> Result<serde_json::Value> {
    let past: Vec<ScoreRecord> = history.iter().filter(|r| r.subject_id == subject_id).cloned().collect();
    Ok(serde_json::to_value(seed_averages(&config.schema, &past, config.seed_default))?)
}

pub fn run_finalize(
    subject_id: &str,
    events: &[TacticalEvent],
    session: SessionDescriptor,
    config: &TrackerConfig,
) -> Result<serde_json::Value> {
    let mut stats = LogStats::default();
    for event in events {
        stats.record(event);
    }
    tracing::info!(
        "Finalizing {} events for {} ({} positive, {} negative)",
        stats.total,
        subject_id,
        stats.positive,
        stats.negative
    );
    let record = finalize(subject_id, session.session_ref(), events, config);
    Ok(serde_json::to_value(PendingWrite { record, session })?)
}
