use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::CreditAnchorError;
use crate::types::{Money, Percent, Rate};
use crate::CreditAnchorResult;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Convert a form percentage (12.5) into a decimal rate (0.125).
pub fn percent_to_rate(pct: Percent) -> Rate {
    pct / dec!(100)
}

/// Monthly periodic rate for an annual percentage: pct / 100 / 12.
pub fn monthly_rate(annual_pct: Percent) -> Rate {
    percent_to_rate(annual_pct) / Decimal::from(MONTHS_PER_YEAR)
}

/// Compound factor (1 + r)^n for a whole number of periods.
pub fn compound(rate: Rate, periods: u32) -> CreditAnchorResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(periods))
        .ok_or_else(|| {
            CreditAnchorError::FinancialImpossibility(format!(
                "(1 + {rate})^{periods} overflows the decimal range"
            ))
        })
}

/// Compound factor (1 + r)^t for a possibly fractional number of years.
pub fn compound_fractional(rate: Rate, years: Decimal) -> CreditAnchorResult<Decimal> {
    if years.fract().is_zero() {
        if let Some(whole) = years.to_u32() {
            return compound(rate, whole);
        }
    }
    if rate <= dec!(-1) {
        return Err(CreditAnchorError::invalid(
            "rate",
            "Rate must be greater than -100% for fractional compounding.",
        ));
    }
    (Decimal::ONE + rate).checked_powd(years).ok_or_else(|| {
        CreditAnchorError::FinancialImpossibility(format!(
            "(1 + {rate})^{years} overflows the decimal range"
        ))
    })
}

/// Deflate a nominal value to present-day purchasing power:
/// value / (1 + inflation)^years. Zero inflation returns the value unchanged.
pub fn deflate(value: Money, inflation: Rate, years: Decimal) -> CreditAnchorResult<Money> {
    if inflation.is_zero() || years.is_zero() {
        return Ok(value);
    }
    let factor = compound_fractional(inflation, years)?;
    if factor.is_zero() {
        return Err(CreditAnchorError::DivisionByZero {
            context: "inflation deflator".into(),
        });
    }
    value.checked_div(factor).ok_or_else(|| {
        CreditAnchorError::FinancialImpossibility(format!(
            "{value} deflated by {factor} overflows the decimal range"
        ))
    })
}

/// Compound annual growth rate between two values over `years`, as a decimal.
pub fn cagr(beginning: Money, ending: Money, years: Decimal) -> CreditAnchorResult<Rate> {
    if beginning <= Decimal::ZERO {
        return Err(CreditAnchorError::invalid(
            "beginning_value",
            "Beginning value must be positive.",
        ));
    }
    if years <= Decimal::ZERO {
        return Err(CreditAnchorError::invalid("years", "Years must be positive."));
    }
    if ending < Decimal::ZERO {
        return Err(CreditAnchorError::invalid(
            "ending_value",
            "Ending value cannot be negative.",
        ));
    }
    if ending.is_zero() {
        return Ok(dec!(-1));
    }

    let growth = ending.checked_div(beginning).ok_or_else(|| {
        CreditAnchorError::FinancialImpossibility(format!(
            "{ending} / {beginning} overflows the decimal range"
        ))
    })?;
    if growth == Decimal::ONE {
        return Ok(Decimal::ZERO);
    }
    if years == Decimal::ONE {
        return Ok(growth - Decimal::ONE);
    }

    let root = growth
        .checked_powd(Decimal::ONE / years)
        .ok_or_else(|| {
            CreditAnchorError::FinancialImpossibility(format!(
                "{growth}^(1/{years}) is outside the decimal range"
            ))
        })?;
    Ok(root - Decimal::ONE)
}
