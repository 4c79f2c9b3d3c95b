// Global correlation between daily spend and daily ROAS

use crate::dataset::Dataset;
use crate::schema::field;
use crate::stats::{pearson, ratio};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// Fewer distinct dates than this leave the correlation undefined
pub const MIN_CORRELATION_DATES: usize = 3;

/// Pearson correlation of `roas = revenue / denom(spend)` against spend, per date
///
/// `None` (undefined) with fewer than three distinct dates, when the date,
/// spend or revenue column is absent, or when either series is constant.
pub fn roas_spend_correlation(dataset: &Dataset) -> Option<f64> {
    let dates = dataset.timestamps(field::DATE)?;
    let spend = dataset.numeric(field::SPEND)?;
    let revenue = dataset.numeric(field::REVENUE)?;

    let mut by_date: BTreeMap<NaiveDateTime, (f64, f64)> = BTreeMap::new();
    for (idx, date) in dates.iter().enumerate() {
        if let Some(date) = date {
            let entry = by_date.entry(*date).or_insert((0.0, 0.0));
            entry.0 += spend[idx];
            entry.1 += revenue[idx];
        }
    }

    if by_date.len() < MIN_CORRELATION_DATES {
        tracing::debug!(
            "ROAS/spend correlation undefined: {} distinct dates",
            by_date.len()
        );
        return None;
    }

    let (daily_spend, daily_roas): (Vec<f64>, Vec<f64>) = by_date
        .values()
        .map(|&(s, r)| (s, ratio(r, s)))
        .unzip();

    pearson(&daily_roas, &daily_spend)
}
