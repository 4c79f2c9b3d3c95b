//! Integration tests for summary, candidate generation, scoring and full runs

mod utils;

use adsight::config::AnalysisConfig;
use adsight::dataset::{Column, Dataset};
use adsight::error::IngestError;
use adsight::insight::{self, CampaignTrend, Candidate};
use adsight::loader::DataLoader;
use adsight::pipeline;
use adsight::schema::DriftMode;
use adsight::scoring::{self, ConfidenceScorer};
use adsight::summary;
use chrono::{NaiveDate, TimeZone, Utc};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use utils::{declining_campaigns, full_csv, write_file};

fn load_declining() -> Dataset {
    DataLoader::new(DriftMode::Fail)
        .load_bytes("declining.csv", full_csv(&declining_campaigns()).as_bytes())
        .unwrap()
        .dataset
}

fn config_in(dir: &Path, data_csv: &Path) -> AnalysisConfig {
    AnalysisConfig {
        data_csv: data_csv.to_path_buf(),
        output_dir: dir.join("reports"),
        logs_dir: dir.join("logs"),
        insights_file: dir.join("reports/insights.json"),
        creatives_file: dir.join("reports/creatives.json"),
        report_file: dir.join("reports/report.md"),
        ..AnalysisConfig::default()
    }
}

#[test]
fn test_falling_low_ctr_scores_point_nine() {
    let candidate = Candidate::ctr_drop(CampaignTrend {
        campaign: "A".to_string(),
        trend: -0.015,
        mean: 0.015,
        n: 5,
    });
    let evaluated = scoring::evaluate(&[candidate], 0.6);

    assert!((evaluated[0].confidence - 0.9).abs() < 1e-9);
    assert!(evaluated[0].valid);
}

#[test]
fn test_negative_correlation_scores_point_seven_five() {
    let evaluated = ConfidenceScorer::new(0.6).evaluate(&[Candidate::roas_spend_negative(-0.5)]);
    assert_eq!(evaluated[0].confidence, 0.75);
    assert!(evaluated[0].valid);
}

#[test]
fn test_two_dates_produce_no_correlation_candidate() {
    let day = |d: u32| NaiveDate::from_ymd_opt(2025, 2, d).and_then(|d| d.and_hms_opt(0, 0, 0));
    let ds = Dataset::from_columns(vec![
        Column::text("campaign_name", vec!["A", "B", "A", "B"]),
        Column::timestamp("date", vec![day(1), day(1), day(2), day(2)]),
        Column::numeric("spend", vec![10.0, 10.0, 900.0, 900.0]),
        Column::numeric("revenue", vec![100.0, 100.0, 10.0, 10.0]),
        Column::numeric("impressions", vec![100.0; 4]),
        Column::numeric("clicks", vec![1.0; 4]),
        Column::numeric("ctr", vec![0.01; 4]),
    ])
    .unwrap();

    assert_eq!(insight::roas_spend_correlation(&ds), None);
    assert!(insight::generate_candidates(&ds)
        .iter()
        .all(|c| c.id != "roas_spend_negative"));
}

#[test]
fn test_candidates_from_loaded_dataset() {
    let ds = load_declining();
    let candidates = insight::generate_candidates(&ds);
    let ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["ctr_drop_Summer", "roas_spend_negative"]);

    let evaluated = scoring::evaluate(&candidates, 0.6);
    // slope -0.012 but mean 0.034: only the trend check fires
    assert!((evaluated[0].confidence - 0.7).abs() < 1e-9);
    assert_eq!(evaluated[1].confidence, 0.75);
    assert!(evaluated.iter().all(|h| h.valid));
}

#[test]
fn test_summarize_is_idempotent_and_ordered() {
    let ds = load_declining();
    let first = summary::summarize(&ds);
    let second = summary::summarize(&ds);
    assert_eq!(first, second);

    assert_eq!(first.timeseries.len(), 5);
    assert!(first
        .timeseries
        .windows(2)
        .all(|w| w[0].date < w[1].date));
    // day 1: spend 100 + 80, revenue 400 + 300
    assert_eq!(first.timeseries[0].totals.spend, Some(180.0));
    assert_eq!(first.timeseries[0].totals.roas, Some(700.0 / 180.0));

    let ranked = summary::campaigns_by_ctr(&first);
    assert_eq!(ranked[0].0, "Summer");
}

#[test]
fn test_full_run_writes_artifacts() {
    let dir = TempDir::new().unwrap();
    let data = write_file(dir.path(), "ads.csv", &full_csv(&declining_campaigns()));
    let config = config_in(dir.path(), &data);

    let output = pipeline::run_analysis("Why did CTR drop?", &config).unwrap();
    assert_eq!(output.plan.tasks.len(), 5);
    assert_eq!(output.validated.len(), 2);
    assert_eq!(output.creatives.keys().collect::<Vec<_>>(), vec!["Summer"]);
    assert_eq!(output.creatives["Summer"].suggestions.len(), 5);
    assert_eq!(
        output.creatives["Summer"].source_examples[0],
        "Soft cotton tees for everyday comfort!"
    );

    let at = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap();
    let paths = pipeline::write_artifacts(&output, &config, at).unwrap();
    assert_eq!(paths.log, dir.path().join("logs/log_20250601T083000.json"));

    let insights: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&paths.insights).unwrap()).unwrap();
    assert_eq!(insights["query"], "Why did CTR drop?");
    assert_eq!(insights["plan"]["tasks"][4]["task"], "compile_report");
    assert_eq!(insights["candidates"][0]["id"], "ctr_drop_Summer");
    assert_eq!(insights["validated"][1]["confidence"], 0.75);
    assert!(insights["summary"]["timeseries"].is_array());

    let log: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&paths.log).unwrap()).unwrap();
    assert!(log["_metrics"]["data_load"].is_number());
    assert!(log["_metrics"]["creatives"].is_number());
    assert_eq!(log["source_sha256"], output.load.source_sha256.as_str());

    let report = fs::read_to_string(&paths.report).unwrap();
    assert!(report.starts_with("# Facebook Ads Performance Analysis\n"));
    assert!(report.contains("(Campaign: Summer, Confidence: 0.70)"));
    assert!(report.contains("### Summer\n"));

    let creatives: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&paths.creatives).unwrap()).unwrap();
    assert_eq!(creatives["Summer"]["suggestions"].as_array().unwrap().len(), 5);
}

#[test]
fn test_same_seed_reproduces_creatives() {
    let dir = TempDir::new().unwrap();
    let data = write_file(dir.path(), "ads.csv", &full_csv(&declining_campaigns()));
    let config = config_in(dir.path(), &data);

    let first = pipeline::run_analysis("q", &config).unwrap();
    let second = pipeline::run_analysis("q", &config).unwrap();
    assert_eq!(first.creatives, second.creatives);
}

#[test]
fn test_drift_aborts_run_before_analysis() {
    let dir = TempDir::new().unwrap();
    let data = write_file(dir.path(), "ads.csv", "campaign_name,date\nA,2025-01-01\n");
    let config = config_in(dir.path(), &data);

    let err = pipeline::run_analysis("q", &config).unwrap_err();
    match err.downcast_ref::<IngestError>() {
        Some(IngestError::SchemaDrift { report }) => assert_eq!(report.severity, 0.867),
        other => panic!("Expected SchemaDrift, got {:?}", other),
    }
    assert!(!dir.path().join("reports").exists());
}

#[test]
fn test_warn_mode_run_with_partial_columns() {
    let dir = TempDir::new().unwrap();
    let data = write_file(
        dir.path(),
        "ads.csv",
        "campaign_name,date,spend,revenue\nA,2025-01-01,10,50\nA,2025-01-02,20,40\nA,2025-01-03,40,30\n",
    );
    let config = AnalysisConfig {
        schema_drift_mode: DriftMode::Warn,
        ..config_in(dir.path(), &data)
    };

    let output = pipeline::run_analysis("q", &config).unwrap();
    // No ctr, impressions or clicks: only the correlation rule can fire
    let ids: Vec<&str> = output.candidates.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["roas_spend_negative"]);
    assert_eq!(output.summary.campaign_summary[0].totals.ctr, None);
    assert!(output.creatives.is_empty());
}
