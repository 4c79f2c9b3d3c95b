//! Confidence scoring of candidate hypotheses
//!
//! Each evidence variant maps to one scoring rule in a registry. A rule returns
//! the additive adjustment over the 0.5 base; the sum is clamped to [0, 1] and
//! compared against `confidence_min`. Variants without a registered rule keep
//! the base score.

use crate::insight::{Candidate, Evidence, EvidenceKind};
use serde::Serialize;
use std::collections::HashMap;

pub const BASE_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_CONFIDENCE_MIN: f64 = 0.6;

/// Additive adjustment for one candidate
pub type ScoringRule = fn(&Candidate) -> f64;

fn score_ctr_trend(candidate: &Candidate) -> f64 {
    let Evidence::CtrTrend(trend) = &candidate.evidence else {
        return 0.0;
    };
    let mut adjustment = 0.0;
    if trend.trend < -0.01 {
        adjustment += 0.2;
    }
    if trend.mean < 0.02 {
        adjustment += 0.2;
    }
    adjustment
}

fn score_roas_spend(candidate: &Candidate) -> f64 {
    let Evidence::RoasSpend(evidence) = &candidate.evidence else {
        return 0.0;
    };
    let correlation = candidate.value.unwrap_or(evidence.correlation);
    if correlation < -0.20 {
        0.25
    } else {
        0.0
    }
}

fn score_frequency(candidate: &Candidate) -> f64 {
    let Evidence::Frequency(check) = &candidate.evidence else {
        return 0.0;
    };
    let mut adjustment = 0.0;
    if check.frequency > 3.0 {
        adjustment += 0.15;
    }
    if check.ctr < 0.01 {
        adjustment += 0.15;
    }
    adjustment
}

/// Evidence variant to scoring rule
#[derive(Debug, Clone)]
pub struct ScoringRegistry {
    rules: HashMap<EvidenceKind, ScoringRule>,
}

impl Default for ScoringRegistry {
    fn default() -> Self {
        Self::empty()
            .register(EvidenceKind::CtrTrend, score_ctr_trend)
            .register(EvidenceKind::RoasSpend, score_roas_spend)
            .register(EvidenceKind::Frequency, score_frequency)
    }
}

impl ScoringRegistry {
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Add or replace the rule for a variant
    pub fn register(mut self, kind: EvidenceKind, rule: ScoringRule) -> Self {
        self.rules.insert(kind, rule);
        self
    }

    pub fn rule_for(&self, kind: EvidenceKind) -> Option<ScoringRule> {
        self.rules.get(&kind).copied()
    }

    /// Base plus the variant's adjustment, clamped to [0, 1]
    pub fn score(&self, candidate: &Candidate) -> f64 {
        let adjustment = self
            .rule_for(candidate.kind())
            .map_or(0.0, |rule| rule(candidate));
        (BASE_CONFIDENCE + adjustment).clamp(0.0, 1.0)
    }
}

/// A candidate with its confidence verdict
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatedHypothesis {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub confidence: f64,
    pub valid: bool,
}

/// Scores candidates against a validity threshold
///
/// # Example
/// ```
/// use adsight::insight::Candidate;
/// use adsight::scoring::ConfidenceScorer;
///
/// let scorer = ConfidenceScorer::new(0.6);
/// let evaluated = scorer.evaluate(&[Candidate::roas_spend_negative(-0.5)]);
/// assert_eq!(evaluated[0].confidence, 0.75);
/// assert!(evaluated[0].valid);
/// ```
#[derive(Debug, Clone)]
pub struct ConfidenceScorer {
    registry: ScoringRegistry,
    confidence_min: f64,
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_MIN)
    }
}

impl ConfidenceScorer {
    pub fn new(confidence_min: f64) -> Self {
        Self {
            registry: ScoringRegistry::default(),
            confidence_min,
        }
    }

    pub fn with_registry(mut self, registry: ScoringRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn confidence_min(&self) -> f64 {
        self.confidence_min
    }

    pub fn score(&self, candidate: &Candidate) -> f64 {
        self.registry.score(candidate)
    }

    pub fn evaluate(&self, candidates: &[Candidate]) -> Vec<EvaluatedHypothesis> {
        candidates
            .iter()
            .map(|candidate| {
                let confidence = self.score(candidate);
                let valid = confidence >= self.confidence_min;
                tracing::debug!(
                    "Scored {}: confidence={:.2} valid={}",
                    candidate.id,
                    confidence,
                    valid
                );
                EvaluatedHypothesis {
                    candidate: candidate.clone(),
                    confidence,
                    valid,
                }
            })
            .collect()
    }
}

/// Score `candidates` with the default registry
pub fn evaluate(candidates: &[Candidate], confidence_min: f64) -> Vec<EvaluatedHypothesis> {
    ConfidenceScorer::new(confidence_min).evaluate(candidates)
}
