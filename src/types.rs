//! Core types for the Stormgauge pipeline
//!
//! This module defines the data structures that flow through each stage of
//! the pipeline: typed event records, damage-normalized records, aggregate
//! rows, and the ranked report payload.

use serde::{Deserialize, Serialize};

/// One recorded severe-weather event, typed once at the ingestion boundary.
///
/// `event_type` is free text straight from the source: thousands of
/// near-duplicate spellings exist ("TSTM WIND" vs "THUNDERSTORM WIND") and
/// they are deliberately kept distinct. Damage magnitudes travel with
/// their exponent codes; neither is meaningful alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Event category label, verbatim from the source
    pub event_type: String,
    /// Number of fatalities attributed to the event
    pub fatalities: f64,
    /// Number of injuries attributed to the event
    pub injuries: f64,
    /// Raw property damage magnitude
    pub property_damage: f64,
    /// Exponent code scaling the property damage magnitude
    pub property_damage_exp: String,
    /// Raw crop damage magnitude
    pub crop_damage: f64,
    /// Exponent code scaling the crop damage magnitude
    pub crop_damage_exp: String,
}

/// An event record enriched with decoded, dollar-denominated damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Source record
    pub event: EventRecord,
    /// Property damage in dollars (magnitude x multiplier)
    pub property_damage_usd: f64,
    /// Crop damage in dollars (magnitude x multiplier)
    pub crop_damage_usd: f64,
    /// Property plus crop damage in dollars
    pub total_damage_usd: f64,
}

/// Anything that can be grouped by its event category.
///
/// The aggregator groups on this seam so it can fold raw and
/// damage-normalized records alike.
pub trait Categorized {
    fn event_type(&self) -> &str;
}

impl Categorized for EventRecord {
    fn event_type(&self) -> &str {
        &self.event_type
    }
}

impl Categorized for NormalizedRecord {
    fn event_type(&self) -> &str {
        &self.event.event_type
    }
}

/// The harm metrics the engine can aggregate and rank by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmMetric {
    Fatalities,
    Injuries,
    TotalDamage,
}

impl HarmMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            HarmMetric::Fatalities => "fatalities",
            HarmMetric::Injuries => "injuries",
            HarmMetric::TotalDamage => "total_damage",
        }
    }
}

/// One grouped result: an event category and the summed metric across all
/// records in that category. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub event_type: String,
    pub total: f64,
}

/// Ranked top-N results for the health-impact question, one table per
/// population-harm metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthImpact {
    /// Event categories ranked by total fatalities, descending
    pub fatalities: Vec<AggregateRow>,
    /// Event categories ranked by total injuries, descending
    pub injuries: Vec<AggregateRow>,
}

/// Ranked top-N results for the economic-impact question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicImpact {
    /// Event categories ranked by total damage in dollars, descending
    pub total_damage: Vec<AggregateRow>,
}

/// One titled, pre-ranked table as handed to the rendering collaborator.
///
/// Rows are guaranteed sorted descending by `total`, and `event_type`
/// labels are exactly as they appear in the source data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTable {
    pub title: String,
    pub metric: HarmMetric,
    pub rows: Vec<AggregateRow>,
}

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Complete impact report payload, consumed by the external renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub generated_at_utc: String,
    /// Number of source records the analyses ran over
    pub record_count: usize,
    pub tables: Vec<RankedTable>,
}
