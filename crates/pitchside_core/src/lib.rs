//! # pitchside_core - Match Evaluation and Live Tactical Capture
//!
//! Scores squad members from hand-entered evaluations and from live
//! tactical capture during matches, and aggregates both into the same
//! profile views.
//!
//! ## Features
//! - Single comparable score per evaluation record
//! - Period-filtered averages, rankings, radar and evolution summaries
//! - Greedy 4-3-3 best XI selection
//! - Match clock with halves, pause and side flip
//! - Phase / action / result capture protocol with pitch zone tagging
//! - Capture log finalization into ordinary score records
//! - JSON API for easy integration

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod live;
pub mod models;
pub mod scoring;
pub mod squad;

// Re-export main API functions
pub use api::{
    finalize_capture_json, rank_subjects_json, seed_record_json, select_squad_json, summarize_subject_json,
    ApiError, ApiResponse,
};
pub use config::{AttributeSchema, TrackerConfig};
pub use context::ViewingContext;
pub use error::{CaptureError, CoreError, Result};

// Re-export record model
pub use models::{AttributeGroup, GroupType, PendingWrite, ScoreRecord, SessionDescriptor, SessionRef, Subject};

// Re-export scoring and selection
pub use scoring::{rank_subjects, seed_averages, summarize_subject, PeriodFilter, ScoreNormalizer, SubjectSummary};
pub use squad::{select_squad, SquadSelection};

// Re-export live capture
pub use live::{finalize, CaptureLog, CaptureResult, LiveTracker, MatchClock, Phase, ZoneId};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_captured_and_manual_records_aggregate_together() {
        let config = TrackerConfig::default();

        let manual = ScoreRecord::manual(
            "p1",
            SessionRef::on(day(1)),
            AttributeGroup::filled(&config.schema.keys(GroupType::Technical), 7.0),
            AttributeGroup::filled(&config.schema.keys(GroupType::Physical), 7.0),
            Some(AttributeGroup::filled(&config.schema.keys(GroupType::Tactical), 7.0)),
        );

        let mut tracker = LiveTracker::new();
        tracker.track("p1");
        tracker.start(0);
        tracker.poll(90_000);
        tracker.select_phase(Phase::Offensive).unwrap();
        for result in [CaptureResult::Positive, CaptureResult::Positive, CaptureResult::Negative, CaptureResult::Neutral]
        {
            tracker.select_action("pass").unwrap();
            tracker.qualify(result).unwrap();
        }
        let descriptor = SessionDescriptor::new(day(8), "team-a", None);
        let writes = tracker.finalize_all(&descriptor, &config);
        assert_eq!(writes.len(), 1);

        let history = vec![manual, writes[0].record.clone()];
        let ctx = ViewingContext::new(day(10));
        let summary = summarize_subject("p1", &history, &ctx, &config);

        assert_eq!(summary.record_count, 2);
        // capture: tech 5, phys 5, tac 5 -> 5; manual -> 7
        assert_eq!(summary.overall_average, 6.0);
        assert_eq!(summary.evolution.iter().map(|p| p.score).collect::<Vec<_>>(), vec![7.0, 5.0]);
    }

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
