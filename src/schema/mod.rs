//! storm.event_record.v1 input schema
//!
//! This module defines the tabular input schema for recorded severe-weather
//! events: the source column layout, per-row data-quality validation, and
//! the conversion into typed event records at the ingestion boundary.

mod raw_row;

pub use raw_row::*;
