//! One end-to-end analysis run
//!
//! plan -> load -> summarize -> candidates -> evaluate -> creatives. Ingestion
//! errors abort the run before any analysis; artifacts are written separately
//! by `write_artifacts` so library callers can inspect results in memory.

use crate::config::AnalysisConfig;
use crate::creative::{CreativeGenerator, Creatives, DEFAULT_SUGGESTIONS};
use crate::insight::{self, Candidate};
use crate::loader::{DataLoader, LoadReport};
use crate::metrics::{Stage, StageMetrics};
use crate::planner::{self, Plan};
use crate::report::{self, InsightsDocument, RunLog};
use crate::scoring::{ConfidenceScorer, EvaluatedHypothesis};
use crate::summary::{self, Summary};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::info;

/// Number of lowest-CTR campaigns targeted when no CTR hypothesis is valid
pub const FALLBACK_TARGETS: usize = 2;

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub query: String,
    pub plan: Plan,
    pub load: LoadReport,
    pub summary: Summary,
    pub candidates: Vec<Candidate>,
    pub validated: Vec<EvaluatedHypothesis>,
    pub creatives: Creatives,
    pub metrics: StageMetrics,
}

/// Paths of the files written for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub insights: PathBuf,
    pub creatives: PathBuf,
    pub report: PathBuf,
    pub log: PathBuf,
}

/// Campaigns that get creative suggestions
///
/// Campaigns of valid hypotheses whose text mentions CTR; otherwise the
/// `FALLBACK_TARGETS` campaigns with the lowest aggregate CTR.
pub fn creative_targets(validated: &[EvaluatedHypothesis], summary: &Summary) -> Vec<String> {
    let mut targets: Vec<String> = Vec::new();
    for hypothesis in validated.iter().filter(|h| h.valid) {
        let Some(campaign) = &hypothesis.candidate.campaign else {
            continue;
        };
        if hypothesis.candidate.hypothesis.to_lowercase().contains("ctr")
            && !targets.contains(campaign)
        {
            targets.push(campaign.clone());
        }
    }

    if targets.is_empty() {
        targets = summary::campaigns_by_ctr(summary)
            .into_iter()
            .take(FALLBACK_TARGETS)
            .map(|(campaign, _)| campaign)
            .collect();
        tracing::debug!("No valid CTR hypotheses; lowest-CTR targets {:?}", targets);
    }
    targets
}

/// Run every stage for `query` under `config`
pub fn run_analysis(query: &str, config: &AnalysisConfig) -> Result<RunOutput> {
    let mut metrics = StageMetrics::new();
    let plan = planner::plan(query);

    let loader = DataLoader::new(config.schema_drift_mode).with_retry(config.retry.clone());
    let loaded = metrics
        .measure(Stage::DataLoad, || loader.load(&config.data_csv))
        .with_context(|| format!("Failed to load {}", config.data_csv.display()))?;
    let dataset = &loaded.dataset;

    let summary = metrics.measure(Stage::Summary, || summary::summarize(dataset));
    let candidates = metrics.measure(Stage::Insights, || insight::generate_candidates(dataset));

    let scorer = ConfidenceScorer::new(config.confidence_min);
    let validated = metrics.measure(Stage::Evaluation, || scorer.evaluate(&candidates));
    info!(
        "{} of {} hypotheses valid at confidence >= {}",
        validated.iter().filter(|h| h.valid).count(),
        validated.len(),
        config.confidence_min
    );

    let creatives = metrics.measure(Stage::Creatives, || {
        let targets = creative_targets(&validated, &summary);
        CreativeGenerator::new(dataset, config.random_seed)
            .generate_for_campaigns(&targets, DEFAULT_SUGGESTIONS)
    });

    Ok(RunOutput {
        query: query.to_string(),
        plan,
        load: loaded.report,
        summary,
        candidates,
        validated,
        creatives,
        metrics,
    })
}

/// Write insights, creatives, the markdown report and a timestamped run log
pub fn write_artifacts(
    output: &RunOutput,
    config: &AnalysisConfig,
    at: DateTime<Utc>,
) -> Result<ArtifactPaths> {
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("Failed to create output dir {}", config.output_dir.display())
    })?;
    std::fs::create_dir_all(&config.logs_dir)
        .with_context(|| format!("Failed to create logs dir {}", config.logs_dir.display()))?;

    report::write_json(
        &config.insights_file,
        &InsightsDocument {
            query: &output.query,
            plan: &output.plan,
            summary: &output.summary,
            candidates: &output.candidates,
            validated: &output.validated,
        },
    )?;
    report::write_json(&config.creatives_file, &output.creatives)?;

    let markdown = report::render_markdown(&output.query, &output.validated, &output.creatives);
    report::write_markdown(&config.report_file, &markdown)?;

    let log = report::log_path(&config.logs_dir, at);
    report::write_json(
        &log,
        &RunLog {
            timestamp: at.naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            query: &output.query,
            source_sha256: &output.load.source_sha256,
            notes: &output.load.notes,
            validated: &output.validated,
            metrics: &output.metrics,
        },
    )?;

    Ok(ArtifactPaths {
        insights: config.insights_file.clone(),
        creatives: config.creatives_file.clone(),
        report: config.report_file.clone(),
        log,
    })
}
