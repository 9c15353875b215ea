//! Per-category aggregation
//!
//! This module folds event records into per-category metric totals. Event
//! categories are free text with unbounded cardinality and are grouped
//! verbatim: near-duplicate labels stay separate groups, since correcting
//! the label taxonomy is outside the analysis.

use std::collections::HashMap;

use crate::types::{AggregateRow, Categorized, EventRecord, NormalizedRecord};

/// Aggregator for summing a metric across records sharing an event type
pub struct Aggregator;

impl Aggregator {
    /// Sum `metric` over all records sharing an event type.
    ///
    /// Produces one row per distinct category, in first-encounter order.
    /// Single pass: a running-sum map keyed by category, plus the
    /// encounter order.
    pub fn aggregate_by<R: Categorized>(
        records: &[R],
        metric: impl Fn(&R) -> f64,
    ) -> Vec<AggregateRow> {
        let mut totals: HashMap<String, f64> = HashMap::new();
        let mut order: Vec<String> = Vec::new();

        for record in records {
            let key = record.event_type();
            match totals.get_mut(key) {
                Some(total) => *total += metric(record),
                None => {
                    totals.insert(key.to_string(), metric(record));
                    order.push(key.to_string());
                }
            }
        }

        order
            .into_iter()
            .map(|event_type| {
                let total = totals.remove(&event_type).unwrap_or(0.0);
                AggregateRow { event_type, total }
            })
            .collect()
    }

    /// Total fatalities per event type.
    pub fn fatalities_by_event_type(records: &[EventRecord]) -> Vec<AggregateRow> {
        Self::aggregate_by(records, |r| r.fatalities)
    }

    /// Total injuries per event type.
    pub fn injuries_by_event_type(records: &[EventRecord]) -> Vec<AggregateRow> {
        Self::aggregate_by(records, |r| r.injuries)
    }

    /// Total damage in dollars per event type.
    pub fn damage_by_event_type(records: &[NormalizedRecord]) -> Vec<AggregateRow> {
        Self::aggregate_by(records, |r| r.total_damage_usd)
    }
}
