//! Property tests for the scoring layer

use chrono::NaiveDate;
use proptest::prelude::*;

use super::aggregation::{attribute_averages, overall_average};
use super::normalizer::{mean, round_to_tenth, ScoreNormalizer};
use super::period::{filter_by_period, PeriodFilter};
use crate::models::{AttributeGroup, GroupType, ScoreRecord, SessionRef};

fn rating_strategy() -> impl Strategy<Value = f64> {
    (0u8..=20).prop_map(|half_steps| f64::from(half_steps) / 2.0)
}

fn group_strategy() -> impl Strategy<Value = AttributeGroup> {
    prop::collection::btree_map("[a-f]{1,3}", rating_strategy(), 0..6)
        .prop_map(|map| AttributeGroup::from_pairs(map))
}

fn date_strategy() -> impl Strategy<Value = String> {
    (2020i32..=2026, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}"))
}

fn record_strategy() -> impl Strategy<Value = ScoreRecord> {
    (date_strategy(), group_strategy(), group_strategy(), prop::option::of(group_strategy())).prop_map(
        |(date, technical, physical, tactical)| {
            ScoreRecord::manual("s", SessionRef { session_id: None, date }, technical, physical, tactical)
        },
    )
}

proptest! {
    #[test]
    fn total_score_ignores_key_order(
        technical in group_strategy(),
        physical in group_strategy(),
        tactical in prop::option::of(group_strategy()),
    ) {
        let reverse = |g: &AttributeGroup| {
            let mut pairs: Vec<(String, f64)> = g.iter().map(|(k, v)| (k.to_string(), v)).collect();
            pairs.reverse();
            AttributeGroup::from_pairs(pairs)
        };

        let forward = ScoreNormalizer::total_score(&technical, &physical, tactical.as_ref());
        let backward = ScoreNormalizer::total_score(
            &reverse(&technical),
            &reverse(&physical),
            tactical.as_ref().map(reverse).as_ref(),
        );
        prop_assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn overall_average_is_mean_of_record_totals(records in prop::collection::vec(record_strategy(), 1..12)) {
        let expected = mean(records.iter().map(ScoreNormalizer::record_total));
        prop_assert!((overall_average(&records) - expected).abs() < 1e-9);
    }

    #[test]
    fn dense_attribute_averages_match_naive_mean(
        values in prop::collection::vec((rating_strategy(), rating_strategy()), 1..10),
    ) {
        let records: Vec<ScoreRecord> = values
            .iter()
            .map(|(passing, shooting)| {
                ScoreRecord::manual(
                    "s",
                    SessionRef { session_id: None, date: "2025-01-01".to_string() },
                    AttributeGroup::from_pairs([("passing", *passing), ("shooting", *shooting)]),
                    AttributeGroup::new(),
                    None,
                )
            })
            .collect();

        let averages = attribute_averages(&records, GroupType::Technical);
        let naive_passing = round_to_tenth(mean(values.iter().map(|(p, _)| *p)));
        let naive_shooting = round_to_tenth(mean(values.iter().map(|(_, s)| *s)));
        prop_assert_eq!(averages.get("passing"), Some(naive_passing));
        prop_assert_eq!(averages.get("shooting"), Some(naive_shooting));
    }

    #[test]
    fn all_period_is_identity(records in prop::collection::vec(record_strategy(), 0..12)) {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        prop_assert_eq!(filter_by_period(&records, &PeriodFilter::All, today), records);
    }
}
