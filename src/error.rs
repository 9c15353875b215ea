//! Error types for Stormgauge

use thiserror::Error;

/// Errors that can occur at the engine's boundaries.
///
/// The analysis stages themselves are total and never fail; errors arise
/// only while reading input or encoding output.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to parse input: {0}")]
    ParseError(String),

    #[error("Invalid CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}
