//! Session Finalizer
//!
//! Reduces a subject's capture log to a score record in the same shape as
//! hand-entered records, so both flow through the aggregation engine
//! unchanged.
//!
//! Live capture yields one holistic score: the share of positive results
//! mapped onto 0-10 in half steps. That score fills every technical and
//! tactical key; physical keys get the neutral baseline. The raw log is kept
//! in the record notes as tagged JSON for replay.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::capture::TacticalEvent;
use super::vocabulary::CaptureResult;
use crate::config::TrackerConfig;
use crate::models::{AttributeGroup, GroupType, ScoreRecord, SessionRef, ZonePoint};

/// Current layout of [`CaptureNotes`].
pub const CAPTURE_NOTES_VERSION: u32 = 1;

/// Share of positive results; 0 for an empty log.
pub fn positive_ratio(events: &[TacticalEvent]) -> f64 {
    if events.is_empty() {
        return 0.0;
    }
    let positive = events.iter().filter(|e| e.result == CaptureResult::Positive).count();
    positive as f64 / events.len() as f64
}

/// `min(10, round(ratio * 20) / 2)`, or `neutral` for an empty log.
pub fn capture_score(events: &[TacticalEvent], neutral: f64) -> f64 {
    if events.is_empty() {
        return neutral;
    }
    ((positive_ratio(events) * 20.0).round() / 2.0).min(10.0)
}

/// Structured payload stored in `ScoreRecord::notes` for capture-derived records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureNotes {
    pub version: u32,
    pub positive_ratio: f64,
    pub score: f64,
    pub events: Vec<TacticalEvent>,
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum StructuredNotes {
    TacticalCapture(CaptureNotes),
}

impl CaptureNotes {
    /// Decode the notes of a capture-derived record. Free-text notes of
    /// manual records yield `None`.
    pub fn parse(notes: &str) -> Option<Self> {
        match serde_json::from_str::<StructuredNotes>(notes) {
            Ok(StructuredNotes::TacticalCapture(notes)) => Some(notes),
            Err(_) => None,
        }
    }

    fn to_notes_string(&self) -> String {
        serde_json::to_string(&StructuredNotes::TacticalCapture(self.clone())).unwrap_or_else(|e| {
            log::error!("finalizer: failed to encode capture notes: {}", e);
            String::new()
        })
    }
}

/// Where a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOrigin {
    Manual,
    TacticalCapture,
}

impl RecordOrigin {
    pub fn of(record: &ScoreRecord) -> Self {
        if CaptureNotes::parse(&record.notes).is_some() {
            RecordOrigin::TacticalCapture
        } else {
            RecordOrigin::Manual
        }
    }
}

/// Build the score record for one subject's capture log.
pub fn finalize(subject_id: &str, session: SessionRef, events: &[TacticalEvent], config: &TrackerConfig) -> ScoreRecord {
    let ratio = positive_ratio(events);
    let score = capture_score(events, config.neutral_score);
    let schema = &config.schema;

    let technical = AttributeGroup::filled(&schema.keys(GroupType::Technical), score);
    let physical = if events.is_empty() {
        AttributeGroup::filled(&schema.keys(GroupType::Physical), config.neutral_score)
    } else {
        AttributeGroup::filled(&schema.keys(GroupType::Physical), config.physical_baseline)
    };
    let tactical = schema.has_tactical().then(|| AttributeGroup::filled(&schema.keys(GroupType::Tactical), score));

    let zone_points: Vec<ZonePoint> = events.iter().filter_map(|e| e.zone_id).map(|z| z.center()).collect();

    let notes = CaptureNotes { version: CAPTURE_NOTES_VERSION, positive_ratio: ratio, score, events: events.to_vec() };

    log::info!(
        "finalizer: {} -> score {} from {} events ({} zoned)",
        subject_id,
        score,
        events.len(),
        zone_points.len()
    );

    ScoreRecord {
        id: Uuid::new_v4(),
        subject_id: subject_id.to_string(),
        session,
        technical,
        physical,
        tactical,
        zone_points,
        notes: notes.to_notes_string(),
    }
}
