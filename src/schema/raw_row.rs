//! storm.event_record.v1 schema definition
//!
//! One row of the source dataset, under the source's own column headers.
//! The dataset carries many more columns than these; the engine reads only
//! the seven it aggregates over and ignores the rest.

use serde::{Deserialize, Serialize};

use crate::exponent;
use crate::types::EventRecord;

/// Current schema version
pub const SCHEMA_VERSION: &str = "storm.event_record.v1";

/// One raw row as it appears in the source CSV.
///
/// Field names follow the source headers so rows deserialize straight out
/// of the file. Exponent cells may be empty; empty decodes to a zero
/// multiplier downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStormRow {
    /// Event category label
    #[serde(rename = "EVTYPE")]
    pub event_type: String,
    /// Fatality count
    #[serde(rename = "FATALITIES")]
    pub fatalities: f64,
    /// Injury count
    #[serde(rename = "INJURIES")]
    pub injuries: f64,
    /// Property damage magnitude
    #[serde(rename = "PROPDMG")]
    pub property_damage: f64,
    /// Property damage exponent code
    #[serde(rename = "PROPDMGEXP", default)]
    pub property_damage_exp: String,
    /// Crop damage magnitude
    #[serde(rename = "CROPDMG")]
    pub crop_damage: f64,
    /// Crop damage exponent code
    #[serde(rename = "CROPDMGEXP", default)]
    pub crop_damage_exp: String,
}

impl RawStormRow {
    /// Convert the raw row into a typed event record.
    ///
    /// This is the parse-once boundary: exponent codes are trimmed of
    /// surrounding whitespace here and nowhere else. The category label is
    /// left untouched so downstream output shows exactly what the source
    /// recorded.
    pub fn to_event(&self) -> EventRecord {
        EventRecord {
            event_type: self.event_type.clone(),
            fatalities: self.fatalities,
            injuries: self.injuries,
            property_damage: self.property_damage,
            property_damage_exp: self.property_damage_exp.trim().to_string(),
            crop_damage: self.crop_damage,
            crop_damage_exp: self.crop_damage_exp.trim().to_string(),
        }
    }

    /// Check the row for data-quality findings.
    ///
    /// These are diagnostics for the validate command, not preconditions:
    /// the analysis pipeline processes every row regardless, zeroing
    /// undocumented exponent codes and passing negative values through.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("FATALITIES", self.fatalities),
            ("INJURIES", self.injuries),
            ("PROPDMG", self.property_damage),
            ("CROPDMG", self.crop_damage),
        ] {
            if value < 0.0 {
                return Err(ValidationError::NegativeValue {
                    field: field.to_string(),
                    value,
                });
            }
        }

        for (field, code) in [
            ("PROPDMGEXP", self.property_damage_exp.trim()),
            ("CROPDMGEXP", self.crop_damage_exp.trim()),
        ] {
            if !exponent::is_documented(code) {
                return Err(ValidationError::UndocumentedExponent {
                    field: field.to_string(),
                    code: code.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Data-quality findings for raw rows
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is negative: {value}")]
    NegativeValue { field: String, value: f64 },

    #[error("{field} carries undocumented exponent code {code:?} (decodes to multiplier 0)")]
    UndocumentedExponent { field: String, code: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_row() -> RawStormRow {
        RawStormRow {
            event_type: "TORNADO".to_string(),
            fatalities: 5.0,
            injuries: 10.0,
            property_damage: 25.0,
            property_damage_exp: "K".to_string(),
            crop_damage: 0.0,
            crop_damage_exp: String::new(),
        }
    }

    #[test]
    fn test_to_event_preserves_fields() {
        let row = make_test_row();
        let event = row.to_event();

        assert_eq!(event.event_type, "TORNADO");
        assert_eq!(event.fatalities, 5.0);
        assert_eq!(event.injuries, 10.0);
        assert_eq!(event.property_damage, 25.0);
        assert_eq!(event.property_damage_exp, "K");
        assert_eq!(event.crop_damage, 0.0);
        assert_eq!(event.crop_damage_exp, "");
    }

    #[test]
    fn test_to_event_trims_exponent_codes_only() {
        let mut row = make_test_row();
        row.event_type = " MARINE TSTM WIND".to_string();
        row.property_damage_exp = " K ".to_string();

        let event = row.to_event();
        assert_eq!(event.property_damage_exp, "K");
        // Labels render exactly as recorded, whitespace included
        assert_eq!(event.event_type, " MARINE TSTM WIND");
    }

    #[test]
    fn test_validate_accepts_clean_row() {
        assert!(make_test_row().validate().is_ok());
    }

    #[test]
    fn test_validate_flags_negative_count() {
        let mut row = make_test_row();
        row.fatalities = -1.0;

        let err = row.validate().unwrap_err();
        assert!(matches!(err, ValidationError::NegativeValue { .. }));
    }

    #[test]
    fn test_validate_flags_undocumented_exponent() {
        let mut row = make_test_row();
        row.crop_damage_exp = "x".to_string();

        let err = row.validate().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UndocumentedExponent { ref field, .. } if field == "CROPDMGEXP"
        ));
    }

    #[test]
    fn test_validate_accepts_documented_symbols() {
        let mut row = make_test_row();
        row.property_damage_exp = "?".to_string();
        row.crop_damage_exp = "-".to_string();

        assert!(row.validate().is_ok());
    }

    #[test]
    fn test_deserialize_from_source_headers() {
        let csv_data = "\
EVTYPE,FATALITIES,INJURIES,PROPDMG,PROPDMGEXP,CROPDMG,CROPDMGEXP
TORNADO,5,10,25.0,K,0,
";
        let mut reader = csv::Reader::from_reader(csv_data.as_bytes());
        let row: RawStormRow = reader.deserialize().next().unwrap().unwrap();

        assert_eq!(row.event_type, "TORNADO");
        assert_eq!(row.property_damage, 25.0);
        assert_eq!(row.property_damage_exp, "K");
        assert_eq!(row.crop_damage_exp, "");
    }
}
