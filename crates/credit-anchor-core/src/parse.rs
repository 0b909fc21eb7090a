//! Parsing of raw form values into decimals.
//!
//! Two conventions coexist:
//!
//! * **Strict** ([`parse_decimal`]) for the loan and growth calculators: a
//!   non-numeric value is an `InvalidInput` error and the caller withholds
//!   the result.
//! * **Permissive** ([`parse_or_zero`], [`parse_count_or_zero`]) for the
//!   readiness wizard: anything that does not parse is treated as zero.
//!
//! Both accept surrounding whitespace, `,` / `_` digit separators and
//! scientific notation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::CreditAnchorError;
use crate::CreditAnchorResult;

fn normalise(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect()
}

fn parse_normalised(cleaned: &str) -> Option<Decimal> {
    if cleaned.is_empty() {
        return None;
    }
    if cleaned.contains(|c: char| c == 'e' || c == 'E') {
        return Decimal::from_scientific(cleaned).ok();
    }
    Decimal::from_str(cleaned).ok()
}

/// Parse a required numeric field, failing on empty or non-numeric input.
pub fn parse_decimal(field: &str, raw: &str) -> CreditAnchorResult<Decimal> {
    let cleaned = normalise(raw);
    if cleaned.is_empty() {
        return Err(CreditAnchorError::invalid(field, "A value is required."));
    }
    parse_normalised(&cleaned).ok_or_else(|| {
        CreditAnchorError::invalid(field, format!("'{}' is not a number.", raw.trim()))
    })
}

/// Parse a required whole-number field such as a tenure.
pub fn parse_periods(field: &str, raw: &str) -> CreditAnchorResult<u32> {
    let value = parse_decimal(field, raw)?;
    if value.fract() != Decimal::ZERO {
        return Err(CreditAnchorError::invalid(field, "Must be a whole number."));
    }
    if value <= Decimal::ZERO {
        return Err(CreditAnchorError::invalid(field, "Must be greater than zero."));
    }
    value
        .to_u32()
        .ok_or_else(|| CreditAnchorError::invalid(field, "Value is too large."))
}

/// Parse a numeric field, treating anything unparseable as zero.
pub fn parse_or_zero(raw: &str) -> Decimal {
    parse_normalised(&normalise(raw)).unwrap_or(Decimal::ZERO)
}

/// Parse a count (age, dependents): truncates fractions, negatives become zero.
pub fn parse_count_or_zero(raw: &str) -> u32 {
    let value = parse_or_zero(raw).trunc();
    if value <= Decimal::ZERO {
        return 0;
    }
    value.to_u32().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal_accepts_separators_and_whitespace() {
        assert_eq!(parse_decimal("principal", " 5,00,000 ").unwrap(), dec!(500000));
        assert_eq!(parse_decimal("principal", "1_250.50").unwrap(), dec!(1250.50));
        assert_eq!(parse_decimal("rate", "1.25e1").unwrap(), dec!(12.5));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        let err = parse_decimal("principal", "abc").unwrap_err();
        match err {
            CreditAnchorError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
        assert!(parse_decimal("principal", "   ").is_err());
    }

    #[test]
    fn test_parse_periods_requires_positive_whole_number() {
        assert_eq!(parse_periods("tenure", "60").unwrap(), 60);
        assert!(parse_periods("tenure", "0").is_err());
        assert!(parse_periods("tenure", "-12").is_err());
        assert!(parse_periods("tenure", "12.5").is_err());
    }

    #[test]
    fn test_parse_or_zero_is_permissive() {
        assert_eq!(parse_or_zero(""), Decimal::ZERO);
        assert_eq!(parse_or_zero("n/a"), Decimal::ZERO);
        assert_eq!(parse_or_zero("45000"), dec!(45000));
        assert_eq!(parse_or_zero("-200"), dec!(-200));
    }

    #[test]
    fn test_parse_count_truncates_and_floors() {
        assert_eq!(parse_count_or_zero("3.9"), 3);
        assert_eq!(parse_count_or_zero("-2"), 0);
        assert_eq!(parse_count_or_zero("two"), 0);
        assert_eq!(parse_count_or_zero("1e20"), u32::MAX);
    }
}
