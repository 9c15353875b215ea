//! CSV ingestion
//!
//! This module reads the tabular source into typed event records. Parsing
//! happens exactly once, here; downstream stages never re-interpret field
//! types. Retrieval and decompression of the source file are the caller's
//! concern.

use std::io::Read;
use std::path::Path;

use crate::error::EngineError;
use crate::schema::{RawStormRow, ValidationError};
use crate::types::EventRecord;

/// Loader for converting source CSV into typed event records
pub struct CsvLoader;

impl CsvLoader {
    /// Read event records from a CSV file.
    pub fn from_path(path: &Path) -> Result<Vec<EventRecord>, EngineError> {
        let mut csv_reader = csv::Reader::from_path(path)?;
        let rows = Self::collect_rows(&mut csv_reader)?;
        Ok(rows.iter().map(RawStormRow::to_event).collect())
    }

    /// Read event records from any CSV byte stream.
    ///
    /// A malformed file fails loudly here; values inside well-formed rows
    /// never do.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<EventRecord>, EngineError> {
        let rows = Self::rows_from_reader(reader)?;
        Ok(rows.iter().map(RawStormRow::to_event).collect())
    }

    /// Read raw rows, keeping the source column values untouched.
    ///
    /// Used by data-quality reporting; the analysis path goes through
    /// `from_reader` instead.
    pub fn rows_from_reader<R: Read>(reader: R) -> Result<Vec<RawStormRow>, EngineError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        Self::collect_rows(&mut csv_reader)
    }

    fn collect_rows<R: Read>(
        csv_reader: &mut csv::Reader<R>,
    ) -> Result<Vec<RawStormRow>, EngineError> {
        let mut rows = Vec::new();
        for (line, result) in csv_reader.deserialize::<RawStormRow>().enumerate() {
            let row = result.map_err(|e| {
                EngineError::ParseError(format!("Failed to parse row {}: {}", line + 1, e))
            })?;
            rows.push(row);
        }
        Ok(rows)
    }

    /// Validate a batch of raw rows, returning only the failures.
    pub fn validate_rows(rows: &[RawStormRow]) -> Vec<RowValidation> {
        rows.iter()
            .enumerate()
            .map(|(idx, row)| RowValidation {
                index: idx,
                event_type: row.event_type.clone(),
                result: row.validate().err(),
            })
            .filter(|r| r.result.is_some())
            .collect()
    }
}

/// Result of row validation
#[derive(Debug)]
pub struct RowValidation {
    pub index: usize,
    pub event_type: String,
    pub result: Option<ValidationError>,
}
