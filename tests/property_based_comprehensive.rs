//! Property-based tests over ingestion and hypothesis invariants
//!
//! Properties covered:
//! 1. Name normalization charset and idempotence
//! 2. Drift severity and missing-field failure under `fail`
//! 3. Confidence scores stay in [0, 1]
//! 4. No trend below three observations
//! 5. Correlation undefined below three dates
//! 6. Coerced numbers are always finite
//! 7. Summaries are deterministic

use adsight::coercion::coerce_number;
use adsight::dataset::{Column, Dataset};
use adsight::error::IngestError;
use adsight::insight::{
    metric_trends, roas_spend_correlation, CampaignTrend, Candidate, FrequencyCheck,
};
use adsight::loader::DataLoader;
use adsight::schema::{normalize_name, DriftMode, SchemaContract, CONTRACT_FIELDS};
use adsight::scoring::ConfidenceScorer;
use adsight::summary::summarize;
use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

fn day(offset: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|d| d.checked_add_days(chrono::Days::new(offset as u64)))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_normalized_names_are_lower_alnum(name in "\\PC{0,24}") {
        let normalized = normalize_name(&name);
        prop_assert!(normalized.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        prop_assert_eq!(normalize_name(&normalized), normalized.clone());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_missing_fields_fail_under_fail_mode(keep in prop::collection::vec(any::<bool>(), 15)) {
        let columns: Vec<&str> = CONTRACT_FIELDS
            .iter()
            .zip(&keep)
            .filter(|(_, keep)| **keep)
            .map(|((name, _), _)| *name)
            .collect();
        prop_assume!(columns.len() < CONTRACT_FIELDS.len());
        prop_assume!(!columns.is_empty());

        let csv = format!("{}\n", columns.join(","));
        let err = DataLoader::new(DriftMode::Fail)
            .load_bytes("prop.csv", csv.as_bytes())
            .unwrap_err();

        match err {
            IngestError::SchemaDrift { report } => {
                let expected = 15 - columns.len();
                prop_assert_eq!(report.missing.len(), expected);
                let severity = ((expected as f64 / SchemaContract.len() as f64) * 1000.0).round() / 1000.0;
                prop_assert_eq!(report.severity, severity);
            }
            other => prop_assert!(false, "Expected SchemaDrift, got {:?}", other),
        }

        // Same source loads in warn mode with the missing fields absent
        let loaded = DataLoader::new(DriftMode::Warn)
            .load_bytes("prop.csv", csv.as_bytes())
            .unwrap();
        prop_assert_eq!(loaded.dataset.column_names().len(), columns.len());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_confidence_in_unit_interval(
        trend in -10.0f64..10.0,
        mean in -10.0f64..10.0,
        correlation in -1.0f64..=1.0,
        frequency in 0.0f64..1000.0,
        ctr in 0.0f64..1.0,
        confidence_min in 0.0f64..=1.0,
    ) {
        let candidates = vec![
            Candidate::ctr_drop(CampaignTrend { campaign: "A".into(), trend, mean, n: 5 }),
            Candidate::roas_spend_negative(correlation),
            Candidate::fatigue(FrequencyCheck { campaign: "A".into(), frequency, ctr }),
        ];

        for evaluated in ConfidenceScorer::new(confidence_min).evaluate(&candidates) {
            prop_assert!((0.0..=1.0).contains(&evaluated.confidence));
            prop_assert_eq!(evaluated.valid, evaluated.confidence >= confidence_min);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_no_trend_below_three_observations(
        values in prop::collection::vec(0.0f64..1.0, 0..3),
    ) {
        let n = values.len();
        let ds = Dataset::from_columns(vec![
            Column::text("campaign_name", vec!["A"; n]),
            Column::timestamp("date", (0..n as u32).map(day).collect()),
            Column::numeric("ctr", values),
        ])
        .unwrap();
        prop_assert!(metric_trends(&ds, "ctr").is_empty());
    }

    #[test]
    fn prop_correlation_undefined_below_three_dates(
        rows in prop::collection::vec((0u32..2, 0.0f64..1000.0, 0.0f64..1000.0), 0..20),
    ) {
        let ds = Dataset::from_columns(vec![
            Column::timestamp("date", rows.iter().map(|r| day(r.0)).collect()),
            Column::numeric("spend", rows.iter().map(|r| r.1).collect()),
            Column::numeric("revenue", rows.iter().map(|r| r.2).collect()),
        ])
        .unwrap();
        prop_assert_eq!(roas_spend_correlation(&ds), None);
    }

    #[test]
    fn prop_correlation_bounded_when_defined(
        rows in prop::collection::vec((0u32..10, 1.0f64..1000.0, 0.0f64..1000.0), 3..30),
    ) {
        let ds = Dataset::from_columns(vec![
            Column::timestamp("date", rows.iter().map(|r| day(r.0)).collect()),
            Column::numeric("spend", rows.iter().map(|r| r.1).collect()),
            Column::numeric("revenue", rows.iter().map(|r| r.2).collect()),
        ])
        .unwrap();
        if let Some(r) = roas_spend_correlation(&ds) {
            prop_assert!((-1.0..=1.0).contains(&r));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_coerced_numbers_are_finite(cell in "\\PC{0,12}") {
        prop_assert!(coerce_number(Some(cell.as_str())).is_finite());
    }

    #[test]
    fn prop_coerced_floats_round_trip(value in -1e9f64..1e9) {
        prop_assert_eq!(coerce_number(Some(value.to_string().as_str())), value);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_summarize_is_deterministic(
        rows in prop::collection::vec((0usize..3, 0u32..5, 0.0f64..500.0, 0.0f64..5000.0), 0..25),
    ) {
        let names = ["A", "B", "C"];
        let ds = Dataset::from_columns(vec![
            Column::text("campaign_name", rows.iter().map(|r| names[r.0]).collect()),
            Column::timestamp("date", rows.iter().map(|r| day(r.1)).collect()),
            Column::numeric("spend", rows.iter().map(|r| r.2).collect()),
            Column::numeric("impressions", rows.iter().map(|r| r.3).collect()),
        ])
        .unwrap();

        let first = summarize(&ds);
        prop_assert_eq!(&first, &summarize(&ds));
        prop_assert!(first.timeseries.windows(2).all(|w| w[0].date < w[1].date));
    }
}
