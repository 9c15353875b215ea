//! Pipeline orchestration
//!
//! This module provides the public API for Stormgauge. It wires the
//! normalizer, aggregator, and ranker into the two fixed analysis flows:
//! health impact (fatalities, injuries) and economic impact (total
//! damage). Each analysis is a pure function of the input record slice.

use crate::aggregator::Aggregator;
use crate::error::EngineError;
use crate::normalizer::DamageNormalizer;
use crate::ranker::Ranker;
use crate::report::ReportEncoder;
use crate::types::{EconomicImpact, EventRecord, HealthImpact, ImpactReport};

/// Default number of top-ranked event categories per table
pub const DEFAULT_TOP_N: usize = 10;

/// Rank event categories by harm to population health.
///
/// Runs two independent passes over the same immutable record slice:
/// aggregate fatalities, rank descending, take the top `top_n`; then the
/// same for injuries.
pub fn health_impact(records: &[EventRecord], top_n: usize) -> HealthImpact {
    let fatalities = Ranker::top(
        Ranker::rank(Aggregator::fatalities_by_event_type(records)),
        top_n,
    );
    let injuries = Ranker::top(
        Ranker::rank(Aggregator::injuries_by_event_type(records)),
        top_n,
    );

    HealthImpact {
        fatalities,
        injuries,
    }
}

/// Rank event categories by economic damage.
///
/// Normalizes every record's damage fields, aggregates total damage per
/// category, ranks descending, and takes the top `top_n`.
pub fn economic_impact(records: &[EventRecord], top_n: usize) -> EconomicImpact {
    let normalized = DamageNormalizer::normalize_all(records);
    let total_damage = Ranker::top(
        Ranker::rank(Aggregator::damage_by_event_type(&normalized)),
        top_n,
    );

    EconomicImpact { total_damage }
}

/// Configured front door running both analyses and encoding the report.
pub struct ImpactAnalyzer {
    top_n: usize,
    encoder: ReportEncoder,
}

impl Default for ImpactAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ImpactAnalyzer {
    /// Create an analyzer with the default top-N cutoff
    pub fn new() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            encoder: ReportEncoder::new(),
        }
    }

    /// Create an analyzer with a specific top-N cutoff
    pub fn with_top_n(top_n: usize) -> Self {
        Self {
            top_n,
            encoder: ReportEncoder::new(),
        }
    }

    /// Run both analyses over the record set and encode the ranked tables.
    pub fn analyze(&self, records: &[EventRecord]) -> ImpactReport {
        let health = health_impact(records, self.top_n);
        let economic = economic_impact(records, self.top_n);
        self.encoder.encode(records.len(), &health, &economic)
    }

    /// Run both analyses and encode the report as JSON.
    pub fn analyze_to_json(&self, records: &[EventRecord]) -> Result<String, EngineError> {
        let report = self.analyze(records);
        self.encoder.encode_to_json(&report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_scenario_records() -> Vec<EventRecord> {
        vec![
            EventRecord {
                event_type: "TORNADO".to_string(),
                fatalities: 5.0,
                injuries: 10.0,
                property_damage: 10.0,
                property_damage_exp: "K".to_string(),
                crop_damage: 0.0,
                crop_damage_exp: String::new(),
            },
            EventRecord {
                event_type: "FLOOD".to_string(),
                fatalities: 1.0,
                injuries: 0.0,
                property_damage: 2.0,
                property_damage_exp: "M".to_string(),
                crop_damage: 1.0,
                crop_damage_exp: "M".to_string(),
            },
            EventRecord {
                event_type: "TORNADO".to_string(),
                fatalities: 3.0,
                injuries: 2.0,
                property_damage: 0.0,
                property_damage_exp: String::new(),
                crop_damage: 0.0,
                crop_damage_exp: String::new(),
            },
        ]
    }

    #[test]
    fn test_health_impact_ranking() {
        let records = make_scenario_records();
        let health = health_impact(&records, 10);

        assert_eq!(health.fatalities.len(), 2);
        assert_eq!(health.fatalities[0].event_type, "TORNADO");
        assert_eq!(health.fatalities[0].total, 8.0);
        assert_eq!(health.fatalities[1].event_type, "FLOOD");
        assert_eq!(health.fatalities[1].total, 1.0);

        assert_eq!(health.injuries[0].event_type, "TORNADO");
        assert_eq!(health.injuries[0].total, 12.0);
    }

    #[test]
    fn test_economic_impact_ranking() {
        let records = make_scenario_records();
        let economic = economic_impact(&records, 10);

        assert_eq!(economic.total_damage.len(), 2);
        assert_eq!(economic.total_damage[0].event_type, "FLOOD");
        assert_eq!(economic.total_damage[0].total, 3_000_000.0);
        assert_eq!(economic.total_damage[1].event_type, "TORNADO");
        assert_eq!(economic.total_damage[1].total, 10_000.0);
    }

    #[test]
    fn test_top_n_limits_each_table() {
        let records = make_scenario_records();
        let health = health_impact(&records, 1);

        assert_eq!(health.fatalities.len(), 1);
        assert_eq!(health.injuries.len(), 1);
        assert_eq!(health.fatalities[0].event_type, "TORNADO");
    }

    #[test]
    fn test_empty_input_yields_empty_tables() {
        let health = health_impact(&[], 10);
        let economic = economic_impact(&[], 10);

        assert!(health.fatalities.is_empty());
        assert!(health.injuries.is_empty());
        assert!(economic.total_damage.is_empty());
    }

    #[test]
    fn test_analyzer_encodes_three_tables() {
        let records = make_scenario_records();
        let report = ImpactAnalyzer::with_top_n(5).analyze(&records);

        assert_eq!(report.record_count, 3);
        assert_eq!(report.tables.len(), 3);
        assert_eq!(report.tables[0].rows[0].event_type, "TORNADO");
        assert_eq!(report.tables[2].rows[0].event_type, "FLOOD");
    }

    #[test]
    fn test_analyzer_json_output_is_valid() {
        let records = make_scenario_records();
        let json = ImpactAnalyzer::new().analyze_to_json(&records).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed.get("report_version").is_some());
        assert!(parsed.get("producer").is_some());
        assert_eq!(parsed["record_count"], 3);
        assert_eq!(parsed["tables"].as_array().unwrap().len(), 3);
    }
}
