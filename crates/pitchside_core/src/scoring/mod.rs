//! # Scoring
//!
//! - `normalizer` - single comparable score per record
//! - `period` - time-window filtering
//! - `aggregation` - averages, rankings, radar and evolution summaries

pub mod aggregation;
pub mod normalizer;
pub mod period;

#[cfg(test)]
mod properties_test;

pub use aggregation::{
    attribute_averages, evolution_series, overall_average, radar_summary, rank_attributes,
    rank_subjects, seed_averages, summarize_subject, AttributeRanking, EvolutionPoint, RadarAxis,
    RankedAttribute, RankedSubject, SeedGroups, SubjectSummary,
};
pub use normalizer::{mean, round_to_half, round_to_tenth, ScoreNormalizer};
pub use period::{filter_by_period, DateRange, PeriodFilter};
