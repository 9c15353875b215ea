//! Stormgauge - Batch compute engine for severe-weather impact rankings
//!
//! Stormgauge folds a tabular dataset of recorded severe-weather events
//! into ranked harm summaries through a deterministic pipeline: damage
//! normalization (exponent decoding) → per-category aggregation → ranking
//! → report encoding.
//!
//! ## Analyses
//!
//! - **Health impact**: event categories ranked by total fatalities and,
//!   independently, by total injuries
//! - **Economic impact**: event categories ranked by total property plus
//!   crop damage in dollars

pub mod aggregator;
pub mod error;
pub mod exponent;
pub mod loader;
pub mod normalizer;
pub mod pipeline;
pub mod ranker;
pub mod report;
pub mod schema;
pub mod types;

pub use error::EngineError;
pub use pipeline::{economic_impact, health_impact, ImpactAnalyzer, DEFAULT_TOP_N};

// Schema exports
pub use schema::{RawStormRow, SCHEMA_VERSION};

/// Engine version embedded in all report payloads
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for report payloads
pub const PRODUCER_NAME: &str = "stormgauge";
