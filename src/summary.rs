//! Time-series and per-campaign rollups of the cleaned dataset
//!
//! Sums spend, impressions, clicks, purchases and revenue per group and derives
//! `ctr = clicks / denom(impressions)` and `roas = revenue / denom(spend)`.
//! A metric whose source column is absent is reported as absent, not zero.

use crate::dataset::Dataset;
use crate::schema::field;
use crate::stats::ratio;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

const SUMMED: [&str; 5] = [
    field::SPEND,
    field::IMPRESSIONS,
    field::CLICKS,
    field::PURCHASES,
    field::REVENUE,
];

/// Summed and derived metrics for one group
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupTotals {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spend: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impressions: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clicks: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchases: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roas: Option<f64>,
}

impl GroupTotals {
    fn from_rows(dataset: &Dataset, rows: &[usize]) -> Self {
        let sum = |name: &str| {
            dataset
                .numeric(name)
                .map(|values| rows.iter().map(|&i| values[i]).sum::<f64>())
        };

        let [spend, impressions, clicks, purchases, revenue] = SUMMED.map(sum);

        Self {
            ctr: clicks.zip(impressions).map(|(c, i)| ratio(c, i)),
            roas: revenue.zip(spend).map(|(r, s)| ratio(r, s)),
            spend,
            impressions,
            clicks,
            purchases,
            revenue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeseriesRow {
    pub date: NaiveDateTime,
    #[serde(flatten)]
    pub totals: GroupTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignRow {
    pub campaign_name: String,
    #[serde(flatten)]
    pub totals: GroupTotals,
}

/// Rollups of one dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Ascending by date
    pub timeseries: Vec<TimeseriesRow>,
    pub campaign_summary: Vec<CampaignRow>,
    pub columns: Vec<String>,
}

/// Build both rollups
///
/// Pure over the dataset, so repeated calls give identical output.
pub fn summarize(dataset: &Dataset) -> Summary {
    let mut by_date: BTreeMap<NaiveDateTime, Vec<usize>> = BTreeMap::new();
    if let Some(dates) = dataset.timestamps(field::DATE) {
        for (idx, date) in dates.iter().enumerate() {
            if let Some(date) = date {
                by_date.entry(*date).or_default().push(idx);
            }
        }
    } else {
        tracing::debug!("No '{}' column; time series is empty", field::DATE);
    }

    let timeseries = by_date
        .into_iter()
        .map(|(date, rows)| TimeseriesRow {
            date,
            totals: GroupTotals::from_rows(dataset, &rows),
        })
        .collect();

    let campaign_summary = match dataset.group_by_text(field::CAMPAIGN_NAME) {
        Some(groups) => groups
            .into_iter()
            .map(|(campaign, rows)| CampaignRow {
                campaign_name: campaign.to_string(),
                totals: GroupTotals::from_rows(dataset, &rows),
            })
            .collect(),
        None => {
            tracing::debug!(
                "No '{}' column; campaign summary is empty",
                field::CAMPAIGN_NAME
            );
            Vec::new()
        }
    };

    Summary {
        timeseries,
        campaign_summary,
        columns: dataset.column_names(),
    }
}

/// Campaigns ordered by ascending aggregate `clicks / denom(impressions)`
pub fn campaigns_by_ctr(summary: &Summary) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = summary
        .campaign_summary
        .iter()
        .filter_map(|row| row.totals.ctr.map(|ctr| (row.campaign_name.clone(), ctr)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}
