//! Report encoding
//!
//! This module packages ranked analysis tables into the versioned report
//! payload consumed by the downstream rendering collaborator. Rows arrive
//! pre-sorted descending and category labels pass through verbatim; the
//! encoder adds producer identity and provenance, nothing more.

use crate::error::EngineError;
use crate::types::{
    EconomicImpact, HarmMetric, HealthImpact, ImpactReport, RankedTable, ReportProducer,
};
use crate::{ENGINE_VERSION, PRODUCER_NAME};
use chrono::Utc;
use uuid::Uuid;

/// Current report payload version
pub const REPORT_VERSION: &str = "1.0.0";

/// Encoder for producing impact report payloads
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Encode the three ranked tables into a report payload.
    pub fn encode(
        &self,
        record_count: usize,
        health: &HealthImpact,
        economic: &EconomicImpact,
    ) -> ImpactReport {
        let producer = ReportProducer {
            name: PRODUCER_NAME.to_string(),
            version: ENGINE_VERSION.to_string(),
            instance_id: self.instance_id.clone(),
        };

        let tables = vec![
            RankedTable {
                title: "Fatalities by event type".to_string(),
                metric: HarmMetric::Fatalities,
                rows: health.fatalities.clone(),
            },
            RankedTable {
                title: "Injuries by event type".to_string(),
                metric: HarmMetric::Injuries,
                rows: health.injuries.clone(),
            },
            RankedTable {
                title: "Total damage by event type".to_string(),
                metric: HarmMetric::TotalDamage,
                rows: economic.total_damage.clone(),
            },
        ];

        ImpactReport {
            report_version: REPORT_VERSION.to_string(),
            producer,
            generated_at_utc: Utc::now().to_rfc3339(),
            record_count,
            tables,
        }
    }

    /// Encode a report payload to JSON.
    pub fn encode_to_json(&self, report: &ImpactReport) -> Result<String, EngineError> {
        serde_json::to_string_pretty(report).map_err(EngineError::JsonError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AggregateRow;

    fn make_test_impacts() -> (HealthImpact, EconomicImpact) {
        let health = HealthImpact {
            fatalities: vec![
                AggregateRow {
                    event_type: "TORNADO".to_string(),
                    total: 8.0,
                },
                AggregateRow {
                    event_type: "FLOOD".to_string(),
                    total: 1.0,
                },
            ],
            injuries: vec![AggregateRow {
                event_type: "TORNADO".to_string(),
                total: 12.0,
            }],
        };
        let economic = EconomicImpact {
            total_damage: vec![AggregateRow {
                event_type: "FLOOD".to_string(),
                total: 3_000_000.0,
            }],
        };
        (health, economic)
    }

    #[test]
    fn test_encode_report_payload() {
        let (health, economic) = make_test_impacts();
        let encoder = ReportEncoder::with_instance_id("test-instance".to_string());
        let report = encoder.encode(3, &health, &economic);

        assert_eq!(report.report_version, REPORT_VERSION);
        assert_eq!(report.producer.name, PRODUCER_NAME);
        assert_eq!(report.producer.version, ENGINE_VERSION);
        assert_eq!(report.producer.instance_id, "test-instance");
        assert_eq!(report.record_count, 3);

        assert_eq!(report.tables.len(), 3);
        assert_eq!(report.tables[0].metric, HarmMetric::Fatalities);
        assert_eq!(report.tables[1].metric, HarmMetric::Injuries);
        assert_eq!(report.tables[2].metric, HarmMetric::TotalDamage);
        assert_eq!(report.tables[2].metric.as_str(), "total_damage");

        // Labels and ordering pass through untouched
        assert_eq!(report.tables[0].rows[0].event_type, "TORNADO");
        assert_eq!(report.tables[0].rows[1].event_type, "FLOOD");
        assert_eq!(report.tables[2].rows[0].total, 3_000_000.0);
    }

    #[test]
    fn test_encode_empty_analyses() {
        let health = HealthImpact {
            fatalities: Vec::new(),
            injuries: Vec::new(),
        };
        let economic = EconomicImpact {
            total_damage: Vec::new(),
        };

        let report = ReportEncoder::new().encode(0, &health, &economic);

        assert_eq!(report.record_count, 0);
        assert_eq!(report.tables.len(), 3);
        assert!(report.tables.iter().all(|t| t.rows.is_empty()));
    }

    #[test]
    fn test_encode_to_json_round_trips() {
        let (health, economic) = make_test_impacts();
        let encoder = ReportEncoder::new();
        let report = encoder.encode(3, &health, &economic);
        let json = encoder.encode_to_json(&report).unwrap();

        let parsed: ImpactReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.tables.len(), 3);
        assert_eq!(parsed.tables[0].title, "Fatalities by event type");
        assert_eq!(parsed.tables[0].rows, report.tables[0].rows);
    }
}
