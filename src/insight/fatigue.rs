// Frequency fatigue: impression density against click-through

use crate::dataset::Dataset;
use crate::schema::field;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyCheck {
    pub campaign: String,
    /// Impressions per active day, in thousands
    pub frequency: f64,
    /// clicks / impressions, 0 without impressions
    pub ctr: f64,
}

/// Per-campaign exposure density and click-through
///
/// `days = max(1, span of dated rows in days + 1)`; impressions and clicks are
/// summed over every row of the campaign. Empty when the campaign, impressions
/// or clicks column is absent.
pub fn frequency_check(dataset: &Dataset) -> Vec<FrequencyCheck> {
    let (Some(impressions), Some(clicks), Some(groups)) = (
        dataset.numeric(field::IMPRESSIONS),
        dataset.numeric(field::CLICKS),
        dataset.group_by_text(field::CAMPAIGN_NAME),
    ) else {
        tracing::debug!("Frequency check skipped: required columns absent");
        return Vec::new();
    };
    let dates = dataset.timestamps(field::DATE);

    let groups: Vec<(&str, Vec<usize>)> = groups.into_iter().collect();
    groups
        .into_par_iter()
        .map(|(campaign, rows)| {
            let span = dates.and_then(|dates| {
                let dated = rows.iter().filter_map(|&i| dates[i]);
                let min = dated.clone().min()?;
                let max = dated.max()?;
                Some((max - min).num_days())
            });
            let days = span.map_or(1, |d| (d + 1).max(1)) as f64;

            let total_impressions: f64 = rows.iter().map(|&i| impressions[i]).sum();
            let total_clicks: f64 = rows.iter().map(|&i| clicks[i]).sum();

            FrequencyCheck {
                campaign: campaign.to_string(),
                frequency: total_impressions / days / 1000.0,
                ctr: if total_impressions > 0.0 {
                    total_clicks / total_impressions
                } else {
                    0.0
                },
            }
        })
        .collect()
}
