// Shared CSV fixtures for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const HEADER: &str = "campaign_name,adset_name,date,spend,impressions,clicks,ctr,purchases,revenue,roas,creative_type,creative_message,audience_type,platform,country";

/// One contract-complete row
#[derive(Debug, Clone)]
pub struct AdRow {
    pub campaign: &'static str,
    pub date: &'static str,
    pub spend: f64,
    pub impressions: f64,
    pub clicks: f64,
    pub ctr: f64,
    pub revenue: f64,
    pub message: &'static str,
}

impl AdRow {
    pub fn to_csv(&self) -> String {
        let roas = if self.spend != 0.0 {
            self.revenue / self.spend
        } else {
            self.revenue
        };
        format!(
            "{},{}_set,{},{},{},{},{},1,{},{},Image,\"{}\",Broad,Facebook,US",
            self.campaign,
            self.campaign,
            self.date,
            self.spend,
            self.impressions,
            self.clicks,
            self.ctr,
            self.revenue,
            roas,
            self.message
        )
    }
}

pub fn csv_with_header(header: &str, rows: &[String]) -> String {
    let mut out = String::from(header);
    out.push('\n');
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    out
}

pub fn full_csv(rows: &[AdRow]) -> String {
    let rows: Vec<String> = rows.iter().map(AdRow::to_csv).collect();
    csv_with_header(HEADER, &rows)
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Campaign "Summer": CTR falling 1.2 points a day over five days while impressions
/// climb; campaign "Winter": flat healthy CTR. Spend rises while ROAS falls.
pub fn declining_campaigns() -> Vec<AdRow> {
    let summer_ctr = [0.058, 0.046, 0.034, 0.022, 0.010];
    let dates = [
        "2025-01-01",
        "2025-01-02",
        "2025-01-03",
        "2025-01-04",
        "2025-01-05",
    ];
    let mut rows = Vec::new();
    for (i, &date) in dates.iter().enumerate() {
        let impressions = 20000.0 + 2000.0 * i as f64;
        rows.push(AdRow {
            campaign: "Summer",
            date,
            spend: 100.0 + 50.0 * i as f64,
            impressions,
            clicks: (impressions * summer_ctr[i]).round(),
            ctr: summer_ctr[i],
            revenue: 400.0 - 40.0 * i as f64,
            message: "Soft cotton tees for everyday comfort!",
        });
        rows.push(AdRow {
            campaign: "Winter",
            date,
            spend: 80.0 + 40.0 * i as f64,
            impressions: 5000.0,
            clicks: 250.0,
            ctr: 0.05,
            revenue: 300.0 - 30.0 * i as f64,
            message: "Warm wool layers, limited stock",
        });
    }
    rows
}
