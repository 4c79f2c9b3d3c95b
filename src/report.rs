//! Run artifacts: insights and creatives JSON, run log, markdown report

use crate::creative::Creatives;
use crate::insight::Candidate;
use crate::metrics::StageMetrics;
use crate::planner::Plan;
use crate::schema::ValidationNote;
use crate::scoring::EvaluatedHypothesis;
use crate::summary::Summary;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Contents of `insights.json`
#[derive(Debug, Serialize)]
pub struct InsightsDocument<'a> {
    pub query: &'a str,
    pub plan: &'a Plan,
    pub summary: &'a Summary,
    pub candidates: &'a [Candidate],
    pub validated: &'a [EvaluatedHypothesis],
}

/// Contents of one `log_<timestamp>.json`
#[derive(Debug, Serialize)]
pub struct RunLog<'a> {
    pub timestamp: String,
    pub query: &'a str,
    pub source_sha256: &'a str,
    pub notes: &'a [ValidationNote],
    pub validated: &'a [EvaluatedHypothesis],
    #[serde(rename = "_metrics")]
    pub metrics: &'a StageMetrics,
}

/// `log_<UTC yyyymmddTHHMMSS>.json` under `logs_dir`
pub fn log_path(logs_dir: &Path, at: DateTime<Utc>) -> PathBuf {
    logs_dir.join(format!("log_{}.json", at.format("%Y%m%dT%H%M%S")))
}

/// Pretty-printed JSON, creating parent directories as needed
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn write_markdown(path: &Path, content: &str) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display())),
        _ => Ok(()),
    }
}

/// Markdown report of the valid hypotheses and creative suggestions
///
/// # Example
/// ```
/// use adsight::creative::Creatives;
/// use adsight::report::render_markdown;
///
/// let md = render_markdown("Analyze ROAS drop", &[], &Creatives::new());
/// assert!(md.starts_with("# Facebook Ads Performance Analysis\n"));
/// assert!(md.contains("Query: **Analyze ROAS drop**"));
/// ```
pub fn render_markdown(
    query: &str,
    validated: &[EvaluatedHypothesis],
    creatives: &Creatives,
) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "# Facebook Ads Performance Analysis");
    let _ = writeln!(out, "Query: **{}**\n", query);

    let _ = writeln!(out, "## Key Insights");
    for hypothesis in validated.iter().filter(|h| h.valid) {
        let _ = writeln!(
            out,
            "- **{}** (Campaign: {}, Confidence: {:.2})",
            hypothesis.candidate.hypothesis,
            hypothesis.candidate.campaign.as_deref().unwrap_or("all"),
            hypothesis.confidence
        );
    }

    let _ = writeln!(out, "\n## Creative Recommendations");
    for (campaign, entry) in creatives {
        let _ = writeln!(out, "### {}", campaign);
        for suggestion in &entry.suggestions {
            let _ = writeln!(out, "- {}", suggestion);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creative::CampaignCreatives;
    use crate::insight::CampaignTrend;
    use crate::scoring::evaluate;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn validated() -> Vec<EvaluatedHypothesis> {
        let falling = Candidate::ctr_drop(CampaignTrend {
            campaign: "Summer".to_string(),
            trend: -0.02,
            mean: 0.015,
            n: 4,
        });
        let weak = Candidate::roas_spend_negative(-0.16);
        evaluate(&[falling, weak], 0.6)
    }

    #[test]
    fn test_markdown_lists_only_valid_hypotheses() {
        let mut creatives = Creatives::new();
        creatives.insert(
            "Summer".to_string(),
            CampaignCreatives {
                suggestions: vec!["Soft Cotton Comfort. Shop Now.".to_string()],
                source_examples: vec![],
            },
        );

        let md = render_markdown("Why did CTR drop?", &validated(), &creatives);
        assert!(md.contains(
            "- **CTR is falling: creative fatigue or weak messaging** (Campaign: Summer, Confidence: 0.90)"
        ));
        assert!(!md.contains("Increasing spend"));
        assert!(md.contains("## Creative Recommendations\n### Summer\n- Soft Cotton Comfort. Shop Now.\n"));
    }

    #[test]
    fn test_log_path_format() {
        let at = Utc.with_ymd_and_hms(2025, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            log_path(Path::new("logs"), at),
            PathBuf::from("logs/log_20250309T140507.json")
        );
    }

    #[test]
    fn test_write_json_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out/insights.json");
        write_json(&path, &validated()).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed[0]["id"], "ctr_drop_Summer");
        assert_eq!(parsed[1]["valid"], false);
    }

    #[test]
    fn test_run_log_metrics_key() {
        let mut metrics = StageMetrics::new();
        metrics.record(crate::metrics::Stage::DataLoad, std::time::Duration::from_millis(3));
        let log = RunLog {
            timestamp: "2025-03-09T14:05:07".to_string(),
            query: "q",
            source_sha256: "abc",
            notes: &[],
            validated: &[],
            metrics: &metrics,
        };
        let json = serde_json::to_value(&log).unwrap();
        assert!(json["_metrics"]["data_load"].is_number());
    }
}
