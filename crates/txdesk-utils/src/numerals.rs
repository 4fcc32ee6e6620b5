//! Numeral formatting for transaction amounts
//!
//! Amounts are shown either as plain decimal integers or as classic Roman
//! numerals. Classic numerals only cover 1..=3999, anything outside that
//! range is rendered in decimal instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest value expressible with classic Roman numerals
pub const ROMAN_MAX: u32 = 3999;

/// Symbol table, largest value first
const ROMAN_SYMBOLS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// How amounts are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumeralMode {
    /// Base-10 digits
    Decimal,
    /// Classic Roman numerals
    Roman,
}

impl Default for NumeralMode {
    fn default() -> Self {
        NumeralMode::Decimal
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid numeral mode: {0}")]
pub struct ParseNumeralModeError(pub String);

impl std::str::FromStr for NumeralMode {
    type Err = ParseNumeralModeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "decimal" | "number" => Ok(NumeralMode::Decimal),
            "roman" => Ok(NumeralMode::Roman),
            _ => Err(ParseNumeralModeError(s.to_string())),
        }
    }
}

impl std::fmt::Display for NumeralMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumeralMode::Decimal => write!(f, "decimal"),
            NumeralMode::Roman => write!(f, "roman"),
        }
    }
}

/// Format a value in the given mode.
///
/// Roman mode falls back to the decimal string for values that classic
/// numerals cannot express (zero, negatives, and anything above 3999).
pub fn format_numeral(value: i64, mode: NumeralMode) -> String {
    match mode {
        NumeralMode::Decimal => value.to_string(),
        NumeralMode::Roman => u32::try_from(value)
            .ok()
            .and_then(to_roman)
            .unwrap_or_else(|| value.to_string()),
    }
}

/// Convert to a Roman numeral, `None` outside 1..=3999
pub fn to_roman(value: u32) -> Option<String> {
    if value == 0 || value > ROMAN_MAX {
        return None;
    }

    let mut remaining = value;
    let mut out = String::new();
    for (symbol_value, symbol) in ROMAN_SYMBOLS {
        let count = remaining / symbol_value;
        out.push_str(&symbol.repeat(count as usize));
        remaining -= count * symbol_value;
    }
    debug_assert_eq!(remaining, 0);
    Some(out)
}

/// Parse a canonical Roman numeral back to its value.
///
/// Only canonical forms are accepted: "IIII" or "IC" return `None` even
/// though a lenient reader might accept them.
pub fn from_roman(numeral: &str) -> Option<u32> {
    if numeral.is_empty() {
        return None;
    }

    let mut rest = numeral;
    let mut total = 0u32;
    for (symbol_value, symbol) in ROMAN_SYMBOLS {
        while let Some(stripped) = rest.strip_prefix(symbol) {
            total += symbol_value;
            rest = stripped;
        }
    }

    if !rest.is_empty() {
        return None;
    }
    // Greedy parsing accepts a few non-canonical spellings, reject them here
    match to_roman(total) {
        Some(canonical) if canonical == numeral => Some(total),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_conversions() {
        let table = [
            (1, "I"),
            (4, "IV"),
            (9, "IX"),
            (14, "XIV"),
            (40, "XL"),
            (90, "XC"),
            (400, "CD"),
            (944, "CMXLIV"),
            (1994, "MCMXCIV"),
            (2024, "MMXXIV"),
            (3999, "MMMCMXCIX"),
        ];
        for (value, expected) in table {
            assert_eq!(format_numeral(value, NumeralMode::Roman), expected, "value {}", value);
        }
    }

    #[test]
    fn test_roman_round_trips_whole_range() {
        for n in 1..=ROMAN_MAX {
            let numeral = to_roman(n).unwrap();
            assert_eq!(from_roman(&numeral), Some(n), "numeral {}", numeral);
        }
    }

    #[test]
    fn test_out_of_range_falls_back_to_decimal() {
        assert_eq!(format_numeral(4000, NumeralMode::Roman), "4000");
        assert_eq!(format_numeral(125_000, NumeralMode::Roman), "125000");
        assert_eq!(format_numeral(0, NumeralMode::Roman), "0");
        assert_eq!(format_numeral(-12, NumeralMode::Roman), "-12");
    }

    #[test]
    fn test_decimal_mode_is_plain() {
        assert_eq!(format_numeral(944, NumeralMode::Decimal), "944");
        assert_eq!(format_numeral(-5, NumeralMode::Decimal), "-5");
    }

    #[test]
    fn test_from_roman_rejects_non_canonical() {
        assert_eq!(from_roman("IIII"), None);
        assert_eq!(from_roman("IC"), None);
        assert_eq!(from_roman("MMMM"), None);
        assert_eq!(from_roman("ABC"), None);
        assert_eq!(from_roman(""), None);
    }

    #[test]
    fn test_mode_parse_and_display() {
        assert_eq!("roman".parse::<NumeralMode>().unwrap(), NumeralMode::Roman);
        assert_eq!("Decimal".parse::<NumeralMode>().unwrap(), NumeralMode::Decimal);
        assert!("hex".parse::<NumeralMode>().is_err());
        assert_eq!(NumeralMode::Roman.to_string(), "roman");
    }
}
