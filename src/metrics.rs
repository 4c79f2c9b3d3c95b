//! Per-stage wall-clock timings for one analysis run
//!
//! Recorded into the run log under `_metrics` as milliseconds per stage.

use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Pipeline stages that are timed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Source read, validation and coercion
    DataLoad,
    Summary,
    /// Detectors and candidate building
    Insights,
    Evaluation,
    Creatives,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::DataLoad => "data_load",
            Stage::Summary => "summary",
            Stage::Insights => "insights",
            Stage::Evaluation => "evaluation",
            Stage::Creatives => "creatives",
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct StageMetrics {
    timings: BTreeMap<Stage, Duration>,
}

impl StageMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure the time taken by one stage
    ///
    /// # Example
    /// ```
    /// use adsight::metrics::{Stage, StageMetrics};
    ///
    /// let mut metrics = StageMetrics::new();
    /// let rows = metrics.measure(Stage::DataLoad, || 3);
    /// assert_eq!(rows, 3);
    /// assert!(metrics.elapsed(Stage::DataLoad).is_some());
    /// ```
    pub fn measure<F, R>(&mut self, stage: Stage, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        self.record(stage, start.elapsed());
        result
    }

    /// Add `duration` to a stage, accumulating repeated measurements
    pub fn record(&mut self, stage: Stage, duration: Duration) {
        *self.timings.entry(stage).or_default() += duration;
    }

    pub fn elapsed(&self, stage: Stage) -> Option<Duration> {
        self.timings.get(&stage).copied()
    }

    pub fn total(&self) -> Duration {
        self.timings.values().sum()
    }

    /// Stage name to elapsed milliseconds
    pub fn to_millis(&self) -> BTreeMap<&'static str, f64> {
        self.timings
            .iter()
            .map(|(stage, d)| (stage.as_str(), d.as_secs_f64() * 1000.0))
            .collect()
    }
}

impl Serialize for StageMetrics {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_millis().serialize(serializer)
    }
}
