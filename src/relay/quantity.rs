//! Byte-quantity parsing for download requests.
//!
//! The path segment names how many bytes the client wants the upstream to
//! serve: decimal digits plus at most one trailing unit letter. `k`, `m` and
//! `g` (either case) scale by 10^3, 10^6 and 10^9; any other letter leaves
//! the value unscaled. An empty segment means the fixed default.

use thiserror::Error;

/// Bytes requested when the path carries no quantity at all.
pub const DEFAULT_BYTES: u64 = 100_000_000;

/// Segment did not name a representable byte quantity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("path segment {0:?} is not a byte quantity (expected digits with an optional k/m/g suffix)")]
pub struct ParseQuantityError(pub String);

/// Parse a path segment into a byte quantity.
///
/// Pure function, independent of any transport concern.
pub fn parse_quantity(segment: &str) -> Result<u64, ParseQuantityError> {
    if segment.is_empty() {
        return Ok(DEFAULT_BYTES);
    }

    let malformed = || ParseQuantityError(segment.to_string());

    let (digits, unit) = match segment.char_indices().last() {
        Some((idx, ch)) if ch.is_ascii_alphabetic() => (&segment[..idx], Some(ch)),
        _ => (segment, None),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    let base: u64 = digits.parse().map_err(|_| malformed())?;

    let multiplier = match unit.map(|u| u.to_ascii_lowercase()) {
        Some('k') => 1_000,
        Some('m') => 1_000_000,
        Some('g') => 1_000_000_000,
        _ => 1,
    };

    base.checked_mul(multiplier).ok_or_else(malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_segment_uses_default() {
        assert_eq!(parse_quantity(""), Ok(DEFAULT_BYTES));
        assert_eq!(DEFAULT_BYTES, 100_000_000);
    }

    #[test]
    fn plain_digits_parse_exactly() {
        assert_eq!(parse_quantity("500"), Ok(500));
        assert_eq!(parse_quantity("0"), Ok(0));
        assert_eq!(parse_quantity("100000000"), Ok(100_000_000));
    }

    #[test]
    fn units_scale_case_insensitively() {
        assert_eq!(parse_quantity("7k"), Ok(7_000));
        assert_eq!(parse_quantity("7K"), Ok(7_000));
        assert_eq!(parse_quantity("10m"), Ok(10_000_000));
        assert_eq!(parse_quantity("10M"), Ok(10_000_000));
        assert_eq!(parse_quantity("2g"), Ok(2_000_000_000));
        assert_eq!(parse_quantity("2G"), Ok(2_000_000_000));
    }

    #[test]
    fn unknown_unit_letters_leave_the_value_unscaled() {
        assert_eq!(parse_quantity("5x"), Ok(5));
        assert_eq!(parse_quantity("5B"), Ok(5));
    }

    #[test]
    fn malformed_segments_are_rejected() {
        for segment in ["abc", "k", "12kb", "1.5m", "-5", "5 ", " 5", "10k2", "１０"] {
            assert!(parse_quantity(segment).is_err(), "{segment:?} should fail");
        }
    }

    #[test]
    fn embedded_path_separators_are_rejected() {
        assert!(parse_quantity("100k/extra").is_err());
        assert!(parse_quantity("ws/child").is_err());
    }

    #[test]
    fn overflow_is_malformed_not_wrapped() {
        assert!(parse_quantity("99999999999999999999").is_err());
        assert!(parse_quantity("99999999999g").is_err());
        // Largest representable scaled value still parses.
        assert_eq!(parse_quantity("18446744073709551615"), Ok(u64::MAX));
    }
}
