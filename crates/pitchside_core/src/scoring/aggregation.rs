//! # Aggregation Engine
//!
//! Turns a subject's history of score records into comparable summaries:
//! overall average, sparse per-attribute averages, best/worst rankings,
//! radar axes, evolution series, and seed values for new records.
//!
//! Every function here is total. Empty input yields 0, an empty list or
//! `None`; the caller renders a "not enough data" state for those.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::normalizer::{mean, round_to_half, round_to_tenth, ScoreNormalizer};
use super::period::filter_by_period;
use crate::config::{AttributeSchema, TrackerConfig};
use crate::context::ViewingContext;
use crate::models::{AttributeGroup, GroupType, ScoreRecord, Subject};

/// Running sum/count per key, remembering first-seen order.
#[derive(Default)]
struct KeyAccumulator {
    order: Vec<String>,
    totals: HashMap<String, (f64, u32)>,
}

impl KeyAccumulator {
    fn add_group(&mut self, group: &AttributeGroup) {
        for (key, value) in group.iter() {
            match self.totals.get_mut(key) {
                Some((sum, count)) => {
                    *sum += value;
                    *count += 1;
                }
                None => {
                    self.order.push(key.to_string());
                    self.totals.insert(key.to_string(), (value, 1));
                }
            }
        }
    }

    fn mean_of(&self, key: &str) -> Option<f64> {
        self.totals.get(key).map(|(sum, count)| sum / f64::from(*count))
    }

    fn into_group(self, round: fn(f64) -> f64) -> AttributeGroup {
        let mut group = AttributeGroup::new();
        for key in &self.order {
            if let Some(avg) = self.mean_of(key) {
                group.set(key.clone(), round(avg));
            }
        }
        group
    }
}

fn accumulate(records: &[ScoreRecord], group_type: GroupType) -> KeyAccumulator {
    let mut acc = KeyAccumulator::default();
    for group in records.iter().filter_map(|r| r.group(group_type)) {
        acc.add_group(group);
    }
    acc
}

/// Mean of the normalized record scores; 0 for an empty set.
pub fn overall_average(records: &[ScoreRecord]) -> f64 {
    mean(records.iter().map(ScoreNormalizer::record_total))
}

/// Per-key average over only the records that carry the key, one decimal.
///
/// A key seen in 2 of 10 records is averaged over those 2. Missing keys
/// are never treated as zero.
pub fn attribute_averages(records: &[ScoreRecord], group_type: GroupType) -> AttributeGroup {
    accumulate(records, group_type).into_group(round_to_tenth)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAttribute {
    pub key: String,
    pub label: String,
    pub score: f64,
    pub group_type: GroupType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeRanking {
    pub best: Vec<RankedAttribute>,
    pub worst: Vec<RankedAttribute>,
}

/// Top and bottom `depth` attributes by average.
///
/// Candidates are ordered technical, physical, then tactical, each in
/// first-seen order; equal scores keep that order. Tactical attributes
/// count only when some record in the set carries a tactical group.
pub fn rank_attributes(
    records: &[ScoreRecord],
    schema: &AttributeSchema,
    depth: usize,
) -> Option<AttributeRanking> {
    let include_tactical = records.iter().any(ScoreRecord::has_tactical);

    let mut candidates = Vec::new();
    for group_type in GroupType::ALL {
        if group_type == GroupType::Tactical && !include_tactical {
            continue;
        }
        for (key, score) in attribute_averages(records, group_type).iter() {
            candidates.push(RankedAttribute {
                key: key.to_string(),
                label: schema.label_for(group_type, key),
                score,
                group_type,
            });
        }
    }

    if candidates.is_empty() {
        return None;
    }

    let mut best = candidates.clone();
    best.sort_by(|a, b| b.score.total_cmp(&a.score));
    best.truncate(depth);

    let mut worst = candidates;
    worst.sort_by(|a, b| a.score.total_cmp(&b.score));
    worst.truncate(depth);

    Some(AttributeRanking { best, worst })
}

/// Starting values for a new record, one group per schema group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedGroups {
    pub technical: AttributeGroup,
    pub physical: AttributeGroup,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tactical: Option<AttributeGroup>,
}

/// Seed each schema key with its historical mean over all past records,
/// rounded to the nearest 0.5, or `default` when the key has no history.
///
/// This is a form pre-fill and is independent of any period filter.
pub fn seed_averages(schema: &AttributeSchema, past_records: &[ScoreRecord], default: f64) -> SeedGroups {
    let seed = |group_type: GroupType| {
        let acc = accumulate(past_records, group_type);
        AttributeGroup::from_pairs(schema.keys(group_type).into_iter().map(|key| {
            let value = acc.mean_of(key).map(round_to_half).unwrap_or(default);
            (key, value)
        }))
    };

    SeedGroups {
        technical: seed(GroupType::Technical),
        physical: seed(GroupType::Physical),
        tactical: schema.has_tactical().then(|| seed(GroupType::Tactical)),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionPoint {
    /// Session day, `YYYY-MM-DD`.
    pub date: String,
    /// Short chart label, `DD/MM`.
    pub date_label: String,
    pub score: f64,
}

/// Record scores ordered by session date, oldest first. Records may be
/// entered out of order; equal dates keep input order.
pub fn evolution_series(records: &[ScoreRecord]) -> Vec<EvolutionPoint> {
    let mut ordered: Vec<&ScoreRecord> = records.iter().collect();
    ordered.sort_by(|a, b| a.session_day().cmp(b.session_day()));

    ordered
        .into_iter()
        .map(|r| EvolutionPoint {
            date: r.session_day().to_string(),
            date_label: r
                .session
                .parsed_date()
                .map(|d| d.format("%d/%m").to_string())
                .unwrap_or_else(|| r.session_day().to_string()),
            score: round_to_tenth(ScoreNormalizer::record_total(r)),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarAxis {
    pub group_type: GroupType,
    pub label: String,
    pub value: f64,
}

/// One axis per group, each the mean of the per-record group averages.
/// The tactical axis appears only when some record carries that group.
pub fn radar_summary(records: &[ScoreRecord]) -> Vec<RadarAxis> {
    GroupType::ALL
        .into_iter()
        .filter_map(|group_type| {
            let averages: Vec<f64> = records
                .iter()
                .filter_map(|r| r.group(group_type))
                .filter(|g| !g.is_empty())
                .map(|g| ScoreNormalizer::group_average(Some(g)))
                .collect();
            if group_type == GroupType::Tactical && averages.is_empty() {
                return None;
            }
            Some(RadarAxis {
                group_type,
                label: group_type.label().to_string(),
                value: round_to_tenth(mean(averages)),
            })
        })
        .collect()
}

/// Everything the profile screen shows for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSummary {
    pub subject_id: String,
    /// Records inside the period window. 0 means "no data", which is
    /// different from an overall average that is genuinely 0.
    pub record_count: usize,
    pub overall_average: f64,
    pub radar: Vec<RadarAxis>,
    pub ranking: Option<AttributeRanking>,
    pub evolution: Vec<EvolutionPoint>,
}

impl SubjectSummary {
    pub fn has_data(&self) -> bool {
        self.record_count > 0
    }
}

/// Summarize the subject's records that fall inside the context's period.
pub fn summarize_subject(
    subject_id: &str,
    history: &[ScoreRecord],
    ctx: &ViewingContext,
    config: &TrackerConfig,
) -> SubjectSummary {
    let own: Vec<ScoreRecord> = history.iter().filter(|r| r.subject_id == subject_id).cloned().collect();
    let records = filter_by_period(&own, &ctx.period, ctx.today);

    SubjectSummary {
        subject_id: subject_id.to_string(),
        record_count: records.len(),
        overall_average: round_to_tenth(overall_average(&records)),
        radar: radar_summary(&records),
        ranking: rank_attributes(&records, &config.schema, config.ranking_depth),
        evolution: evolution_series(&records),
    }
}

/// A subject with its overall average inside the viewing window.
/// `score` is rounded for display; ordering uses the exact `average`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSubject {
    pub subject: Subject,
    pub score: f64,
    pub average: f64,
    pub record_count: usize,
}

/// Subjects in the viewing category ranked by overall average, best first.
/// Equal scores keep the input order.
pub fn rank_subjects(subjects: &[Subject], history: &[ScoreRecord], ctx: &ViewingContext) -> Vec<RankedSubject> {
    let windowed = filter_by_period(history, &ctx.period, ctx.today);

    let mut ranked: Vec<RankedSubject> = subjects
        .iter()
        .filter(|s| ctx.includes_category(s.category_id.as_deref()))
        .map(|subject| {
            let own: Vec<ScoreRecord> =
                windowed.iter().filter(|r| r.subject_id == subject.id).cloned().collect();
            let average = overall_average(&own);
            RankedSubject { subject: subject.clone(), score: round_to_tenth(average), average, record_count: own.len() }
        })
        .collect();

    ranked.sort_by(|a, b| b.average.total_cmp(&a.average));
    ranked
}
