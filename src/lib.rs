//! adsight - schema-validated ad performance analysis
//!
//! Loads a tabular ad-performance export, validates it against a fixed
//! fifteen-field contract with drift detection, coerces it into a clean
//! dataset, and derives scored hypotheses (CTR decline, ROAS/spend
//! correlation, frequency fatigue) plus creative suggestions for low-CTR
//! campaigns.

pub mod cli;
pub mod coercion;
pub mod config;
pub mod creative;
pub mod dataset;
pub mod error;
pub mod insight;
pub mod loader;
pub mod metrics;
pub mod pipeline;
pub mod planner;
pub mod report;
pub mod retry;
pub mod schema;
pub mod scoring;
pub mod stats;
pub mod summary;
pub mod table;
