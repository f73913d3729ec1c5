//! Score normalization
//!
//! Collapses the heterogeneous rating groups of a record into the single
//! 0-10 score used for ranking, radar summaries and squad selection.

use crate::models::{AttributeGroup, ScoreRecord};

/// Calculator for the normalized record score
pub struct ScoreNormalizer;

impl ScoreNormalizer {
    /// Mean of every value in the supplied groups.
    ///
    /// Legacy records without a tactical group average technical and
    /// physical only. No values at all yields 0.
    pub fn total_score(
        technical: &AttributeGroup,
        physical: &AttributeGroup,
        tactical: Option<&AttributeGroup>,
    ) -> f64 {
        let values = technical
            .values()
            .chain(physical.values())
            .chain(tactical.into_iter().flat_map(|g| g.values()));
        mean(values)
    }

    pub fn record_total(record: &ScoreRecord) -> f64 {
        Self::total_score(&record.technical, &record.physical, record.tactical.as_ref())
    }

    /// Mean of one group; 0 when the group is absent or empty.
    pub fn group_average(group: Option<&AttributeGroup>) -> f64 {
        group.map(|g| mean(g.values())).unwrap_or(0.0)
    }
}

/// Arithmetic mean, 0 for an empty input.
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let (sum, count) = values.into_iter().fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Nearest multiple of 0.5.
pub fn round_to_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}
