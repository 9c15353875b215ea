//! Damage exponent decoding
//!
//! The source data records monetary damage as a numeric magnitude paired
//! with a short exponent code indicating its order of magnitude. The code
//! column is partially free text: alongside the letter codes it contains
//! single digits, arithmetic symbols, and empty cells.

/// Decode an exponent code into its numeric multiplier.
///
/// Letters are matched case-insensitively: `H` is hundreds, `K` thousands,
/// `M` millions, `B` billions. Single digits `0`-`8` all map to 10 and `+`
/// maps to 1; this follows the convention established in community
/// documentation of the dataset rather than any published agency rule.
///
/// Every other code, including `-`, `?`, the empty cell, and stray symbols
/// with no documented meaning, maps to 0. Zeroing unknown codes is the
/// defined policy for this column: the stray values have no recoverable
/// magnitude, and failing the batch over them would discard the rest of
/// the record.
pub fn multiplier(code: &str) -> f64 {
    match code {
        "H" | "h" => 100.0,
        "K" | "k" => 1_000.0,
        "M" | "m" => 1_000_000.0,
        "B" | "b" => 1_000_000_000.0,
        "0" | "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" => 10.0,
        "+" => 1.0,
        _ => 0.0,
    }
}

/// Whether a code appears in the documented exponent table.
///
/// `-`, `?`, and the empty cell are documented (they decode to 0); codes
/// outside the table also decode to 0 but are worth surfacing in data
/// quality reports. The analysis pipeline never consults this.
pub fn is_documented(code: &str) -> bool {
    matches!(
        code,
        "H" | "h"
            | "K"
            | "k"
            | "M"
            | "m"
            | "B"
            | "b"
            | "0"
            | "1"
            | "2"
            | "3"
            | "4"
            | "5"
            | "6"
            | "7"
            | "8"
            | "+"
            | "-"
            | "?"
            | ""
    )
}
