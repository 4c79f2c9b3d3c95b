// Heuristic hypothesis generation
//
// Three detectors read the cleaned dataset:
// - trend: per-campaign least-squares slope of CTR over observation index
// - correlation: global Pearson correlation of daily ROAS against daily spend
// - fatigue: per-campaign impression density against click-through rate
//
// Per-campaign detectors only read the shared dataset and write disjoint
// output slots, so they fan out across rayon workers and join before the
// candidate builder runs.

mod candidate;
mod correlation;
mod fatigue;
mod trend;

pub use candidate::{
    build_candidates, Candidate, CorrelationEvidence, Direction, Evidence, EvidenceKind,
    CTR_DROP_TREND, FATIGUE_CTR, FATIGUE_FREQUENCY, ROAS_SPEND_CORRELATION,
};
pub use correlation::{roas_spend_correlation, MIN_CORRELATION_DATES};
pub use fatigue::{frequency_check, FrequencyCheck};
pub use trend::{metric_trends, CampaignTrend, MIN_TREND_OBSERVATIONS};

use crate::dataset::Dataset;
use crate::schema::field;
use serde::Serialize;

/// Raw detector outputs for one dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightSignals {
    pub ctr_trends: Vec<CampaignTrend>,
    /// `None` when undefined (fewer than three dates, absent columns, flat series)
    pub roas_spend_correlation: Option<f64>,
    pub frequency: Vec<FrequencyCheck>,
}

/// Run every detector over the dataset
pub fn collect_signals(dataset: &Dataset) -> InsightSignals {
    let ((ctr_trends, frequency), roas_spend_correlation) = rayon::join(
        || {
            rayon::join(
                || metric_trends(dataset, field::CTR),
                || frequency_check(dataset),
            )
        },
        || roas_spend_correlation(dataset),
    );

    InsightSignals {
        ctr_trends,
        roas_spend_correlation,
        frequency,
    }
}

/// Detector outputs turned into typed candidate hypotheses
pub fn generate_candidates(dataset: &Dataset) -> Vec<Candidate> {
    let signals = collect_signals(dataset);
    let candidates = build_candidates(&signals);
    tracing::info!(
        "Generated {} candidate hypotheses ({} trends, {} frequency checks, correlation={:?})",
        candidates.len(),
        signals.ctr_trends.len(),
        signals.frequency.len(),
        signals.roas_spend_correlation
    );
    candidates
}

/// Dated rows of each campaign, sorted ascending by date; campaigns sorted by name
///
/// `None` when the campaign or date column is absent.
pub(crate) fn dated_campaign_rows(dataset: &Dataset) -> Option<Vec<(String, Vec<usize>)>> {
    let dates = dataset.timestamps(field::DATE)?;
    let groups = dataset.group_by_text(field::CAMPAIGN_NAME)?;

    Some(
        groups
            .into_iter()
            .map(|(campaign, rows)| {
                let mut dated: Vec<usize> =
                    rows.into_iter().filter(|&i| dates[i].is_some()).collect();
                dated.sort_by_key(|&i| dates[i]);
                (campaign.to_string(), dated)
            })
            .collect(),
    )
}
