//! Damage normalization
//!
//! This module converts raw magnitude/exponent pairs into dollar amounts.
//! - Property and crop damage scaled independently via the exponent table
//! - Total damage derived as their sum
//! - No failure modes: every record in, one normalized record out

use crate::exponent;
use crate::types::{EventRecord, NormalizedRecord};

/// Normalizer for converting raw damage fields to dollar amounts
pub struct DamageNormalizer;

impl DamageNormalizer {
    /// Normalize one record's damage fields.
    ///
    /// Pure and total. Magnitudes are not range-checked: the source
    /// guarantees zero (not absent) damage fields when no damage occurred,
    /// and anything else passes through scaled as-is.
    pub fn normalize(record: &EventRecord) -> NormalizedRecord {
        let property_damage_usd =
            scale_damage(record.property_damage, &record.property_damage_exp);
        let crop_damage_usd = scale_damage(record.crop_damage, &record.crop_damage_exp);

        NormalizedRecord {
            event: record.clone(),
            property_damage_usd,
            crop_damage_usd,
            total_damage_usd: property_damage_usd + crop_damage_usd,
        }
    }

    /// Normalize a full batch of records.
    pub fn normalize_all(records: &[EventRecord]) -> Vec<NormalizedRecord> {
        records.iter().map(Self::normalize).collect()
    }
}

/// Apply the exponent multiplier to a raw damage magnitude.
fn scale_damage(magnitude: f64, code: &str) -> f64 {
    magnitude * exponent::multiplier(code)
}
