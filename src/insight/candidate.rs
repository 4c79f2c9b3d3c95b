// Candidate hypotheses built from detector outputs

use crate::insight::fatigue::FrequencyCheck;
use crate::insight::trend::CampaignTrend;
use crate::insight::InsightSignals;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// CTR slope below this emits a `ctr_drop_<campaign>` candidate
pub const CTR_DROP_TREND: f64 = -0.01;
/// Spend/ROAS correlation below this emits `roas_spend_negative`
pub const ROAS_SPEND_CORRELATION: f64 = -0.15;
/// Frequency above this (with CTR below `FATIGUE_CTR`) emits `fatigue_<campaign>`
pub const FATIGUE_FREQUENCY: f64 = 3.0;
pub const FATIGUE_CTR: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increase,
    Decrease,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationEvidence {
    pub correlation: f64,
}

/// Discriminant of `Evidence`, used as the scoring registry key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvidenceKind {
    CtrTrend,
    RoasSpend,
    Frequency,
    Custom,
}

/// Strongly typed support for a candidate
///
/// Serialized as the bare evidence object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Evidence {
    CtrTrend(CampaignTrend),
    RoasSpend(CorrelationEvidence),
    Frequency(FrequencyCheck),
    /// Shapes without a dedicated variant; scored at base confidence
    Custom(BTreeMap<String, f64>),
}

impl Evidence {
    pub fn kind(&self) -> EvidenceKind {
        match self {
            Evidence::CtrTrend(_) => EvidenceKind::CtrTrend,
            Evidence::RoasSpend(_) => EvidenceKind::RoasSpend,
            Evidence::Frequency(_) => EvidenceKind::Frequency,
            Evidence::Custom(_) => EvidenceKind::Custom,
        }
    }
}

/// A hypothesis awaiting evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub id: String,
    pub hypothesis: String,
    pub campaign: Option<String>,
    pub metric: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    pub evidence: Evidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl Candidate {
    pub fn ctr_drop(trend: CampaignTrend) -> Self {
        Self {
            id: format!("ctr_drop_{}", trend.campaign),
            hypothesis: "CTR is falling: creative fatigue or weak messaging".to_string(),
            campaign: Some(trend.campaign.clone()),
            metric: "ctr".to_string(),
            direction: Some(Direction::Decrease),
            evidence: Evidence::CtrTrend(trend),
            value: None,
        }
    }

    pub fn roas_spend_negative(correlation: f64) -> Self {
        Self {
            id: "roas_spend_negative".to_string(),
            hypothesis: "Increasing spend correlates with decreasing ROAS".to_string(),
            campaign: None,
            metric: "roas_vs_spend".to_string(),
            direction: None,
            evidence: Evidence::RoasSpend(CorrelationEvidence { correlation }),
            value: Some(correlation),
        }
    }

    pub fn fatigue(check: FrequencyCheck) -> Self {
        Self {
            id: format!("fatigue_{}", check.campaign),
            hypothesis: "High frequency + low CTR indicates audience fatigue".to_string(),
            campaign: Some(check.campaign.clone()),
            metric: "frequency".to_string(),
            direction: None,
            evidence: Evidence::Frequency(check),
            value: None,
        }
    }

    pub fn kind(&self) -> EvidenceKind {
        self.evidence.kind()
    }
}

/// Apply the threshold rules to detector outputs
///
/// Order: CTR drops, then the correlation candidate, then fatigue candidates.
pub fn build_candidates(signals: &InsightSignals) -> Vec<Candidate> {
    let ctr_drops = signals
        .ctr_trends
        .iter()
        .filter(|t| t.trend < CTR_DROP_TREND)
        .cloned()
        .map(Candidate::ctr_drop);

    let correlation = signals
        .roas_spend_correlation
        .filter(|&r| r < ROAS_SPEND_CORRELATION)
        .map(Candidate::roas_spend_negative);

    let fatigue = signals
        .frequency
        .iter()
        .filter(|f| f.frequency > FATIGUE_FREQUENCY && f.ctr < FATIGUE_CTR)
        .cloned()
        .map(Candidate::fatigue);

    ctr_drops.chain(correlation).chain(fatigue).collect()
}
