// Per-campaign linear trend of a metric

use crate::dataset::Dataset;
use crate::insight::dated_campaign_rows;
use crate::stats::{mean, ols_slope};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Campaigns with fewer dated observations produce no trend
pub const MIN_TREND_OBSERVATIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignTrend {
    pub campaign: String,
    /// OLS slope of the metric against 0-based observation index
    pub trend: f64,
    pub mean: f64,
    pub n: usize,
}

/// Fit a trend of `metric` for every campaign with enough observations
///
/// Empty when the campaign, date or metric column is absent.
pub fn metric_trends(dataset: &Dataset, metric: &str) -> Vec<CampaignTrend> {
    let (Some(values), Some(groups)) = (dataset.numeric(metric), dated_campaign_rows(dataset))
    else {
        tracing::debug!("Trend on '{}' skipped: required columns absent", metric);
        return Vec::new();
    };

    groups
        .into_par_iter()
        .filter_map(|(campaign, rows)| {
            if rows.len() < MIN_TREND_OBSERVATIONS {
                return None;
            }
            let series: Vec<f64> = rows.iter().map(|&i| values[i]).collect();
            Some(CampaignTrend {
                campaign,
                trend: ols_slope(&series)?,
                mean: mean(&series)?,
                n: series.len(),
            })
        })
        .collect()
}
