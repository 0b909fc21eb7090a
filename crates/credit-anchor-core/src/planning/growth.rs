//! Compound-growth planner.
//!
//! Two calculator modes share one result shape:
//!
//! 1. **Lump sum** -- principal compounded annually for `periods` years.
//! 2. **Amortizing** -- an EMI loan over `periods` months; the headline
//!    amount is the installment.
//!
//! Both report an inflation-deflated real value and the CAGR implied by the
//! ending value.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CreditAnchorError;
use crate::loans::amortization::compute_emi;
use crate::time_value::{cagr, compound, deflate, percent_to_rate, MONTHS_PER_YEAR};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::CreditAnchorResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthMode {
    /// `periods` are years, compounded annually.
    #[serde(alias = "lumpsum", alias = "loan")]
    LumpSum,
    /// `periods` are monthly installments.
    #[serde(alias = "emi")]
    Amortizing,
}

impl std::fmt::Display for GrowthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrowthMode::LumpSum => write!(f, "lump_sum"),
            GrowthMode::Amortizing => write!(f, "amortizing"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthInput {
    pub mode: GrowthMode,
    pub principal: Money,
    pub annual_rate_pct: Percent,
    pub periods: u32,
    #[serde(default)]
    pub inflation_rate_pct: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthResult {
    pub mode: GrowthMode,
    /// Future value (lump sum) or the periodic installment (amortizing).
    pub total_amount: Money,
    pub total_interest: Money,
    /// Ending value the CAGR is measured against.
    pub total_paid: Money,
    /// total_amount in today's money.
    pub real_value: Money,
    pub cagr_pct: Percent,
    pub years: Decimal,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn compute_growth(input: &GrowthInput) -> CreditAnchorResult<ComputationOutput<GrowthResult>> {
    let start = Instant::now();
    validate(input)?;

    let result = match input.mode {
        GrowthMode::LumpSum => lump_sum(input)?,
        GrowthMode::Amortizing => amortizing(input)?,
    };

    let mut warnings = Vec::new();
    if input.inflation_rate_pct < Decimal::ZERO {
        warnings.push("Negative inflation (deflation) raises the real value above nominal.".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "mode": input.mode.to_string(),
        "lump_sum": "P * (1 + rate)^years, annual compounding",
        "amortizing": "reducing-balance EMI, years = months / 12",
        "real_value": "total_amount / (1 + inflation)^years",
        "cagr": "(ending / principal)^(1 / years) - 1",
    });

    Ok(with_metadata(
        "Compound growth with inflation adjustment",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

fn lump_sum(input: &GrowthInput) -> CreditAnchorResult<GrowthResult> {
    let rate = percent_to_rate(input.annual_rate_pct);
    let years = Decimal::from(input.periods);

    let total_amount = input
        .principal
        .checked_mul(compound(rate, input.periods)?)
        .ok_or_else(|| {
            CreditAnchorError::FinancialImpossibility(
                "Future value overflows the decimal range".into(),
            )
        })?;
    let real_value = deflate(total_amount, percent_to_rate(input.inflation_rate_pct), years)?;
    let growth = cagr(input.principal, total_amount, years)?;

    Ok(GrowthResult {
        mode: GrowthMode::LumpSum,
        total_amount,
        total_interest: total_amount - input.principal,
        total_paid: total_amount,
        real_value,
        cagr_pct: as_pct(growth)?,
        years,
    })
}

fn amortizing(input: &GrowthInput) -> CreditAnchorResult<GrowthResult> {
    let schedule = compute_emi(input.principal, input.annual_rate_pct, input.periods)?;
    let years = Decimal::from(input.periods) / Decimal::from(MONTHS_PER_YEAR);

    let total_amount = schedule.emi;
    let real_value = deflate(total_amount, percent_to_rate(input.inflation_rate_pct), years)?;
    let growth = cagr(input.principal, schedule.total_payable, years)?;

    Ok(GrowthResult {
        mode: GrowthMode::Amortizing,
        total_amount,
        total_interest: schedule.total_interest,
        total_paid: schedule.total_payable,
        real_value,
        cagr_pct: as_pct(growth)?,
        years,
    })
}

fn as_pct(rate: Decimal) -> CreditAnchorResult<Percent> {
    rate.checked_mul(dec!(100)).ok_or_else(|| {
        CreditAnchorError::FinancialImpossibility("CAGR overflows the decimal range".into())
    })
}

fn validate(input: &GrowthInput) -> CreditAnchorResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(CreditAnchorError::invalid(
            "principal",
            "Principal must be positive.",
        ));
    }
    if input.periods == 0 {
        return Err(CreditAnchorError::invalid(
            "periods",
            "Number of periods must be > 0",
        ));
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(CreditAnchorError::invalid(
            "annual_rate_pct",
            "Rate cannot be negative.",
        ));
    }
    if input.inflation_rate_pct <= dec!(-100) {
        return Err(CreditAnchorError::invalid(
            "inflation_rate_pct",
            "Inflation must be greater than -100%.",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn approx_eq(a: Decimal, b: Decimal, eps: Decimal) -> bool {
        (a - b).abs() < eps
    }

    fn lump(principal: Decimal, rate: Decimal, years: u32, inflation: Decimal) -> GrowthInput {
        GrowthInput {
            mode: GrowthMode::LumpSum,
            principal,
            annual_rate_pct: rate,
            periods: years,
            inflation_rate_pct: inflation,
        }
    }

    #[test]
    fn test_lump_sum_future_value() {
        let out = compute_growth(&lump(dec!(100_000), dec!(10), 2, dec!(5))).unwrap();
        assert_eq!(out.result.total_amount, dec!(121_000));
        assert_eq!(out.result.total_interest, dec!(21_000));
    }

    #[test]
    fn test_lump_sum_cagr_equals_rate() {
        let out = compute_growth(&lump(dec!(100_000), dec!(10), 12, dec!(5))).unwrap();
        assert!(
            approx_eq(out.result.cagr_pct, dec!(10), dec!(0.0001)),
            "cagr={}",
            out.result.cagr_pct
        );
    }

    #[test]
    fn test_lump_sum_real_value_deflated() {
        let out = compute_growth(&lump(dec!(100_000), dec!(10), 2, dec!(10))).unwrap();
        assert_eq!(out.result.real_value, dec!(100_000));
    }

    #[test]
    fn test_zero_inflation_real_equals_nominal() {
        let out = compute_growth(&lump(dec!(50_000), dec!(7), 5, Decimal::ZERO)).unwrap();
        assert_eq!(out.result.real_value, out.result.total_amount);
    }

    #[test]
    fn test_zero_rate_lump_sum_has_no_growth() {
        let out = compute_growth(&lump(dec!(50_000), Decimal::ZERO, 5, dec!(3))).unwrap();
        assert_eq!(out.result.total_amount, dec!(50_000));
        assert_eq!(out.result.cagr_pct, Decimal::ZERO);
        assert!(out.result.real_value < out.result.total_amount);
    }

    #[test]
    fn test_amortizing_returns_installment() {
        let input = GrowthInput {
            mode: GrowthMode::Amortizing,
            principal: dec!(100_000),
            annual_rate_pct: dec!(10),
            periods: 12,
            inflation_rate_pct: dec!(5),
        };
        let out = compute_growth(&input).unwrap();
        let r = &out.result;
        // EMI for 1L at 10% over 12 months ≈ 8,791.59
        assert!(approx_eq(r.total_amount, dec!(8791.59), dec!(0.01)), "emi={}", r.total_amount);
        assert_eq!(r.total_paid, r.total_amount * dec!(12));
        assert_eq!(r.total_interest, r.total_paid - dec!(100_000));
        assert_eq!(r.years, Decimal::ONE);
        assert!(r.real_value < r.total_amount);
    }

    #[test]
    fn test_amortizing_cagr_over_one_year() {
        let input = GrowthInput {
            mode: GrowthMode::Amortizing,
            principal: dec!(100_000),
            annual_rate_pct: dec!(10),
            periods: 12,
            inflation_rate_pct: Decimal::ZERO,
        };
        let out = compute_growth(&input).unwrap();
        let expected = (out.result.total_paid / dec!(100_000) - Decimal::ONE) * dec!(100);
        assert_eq!(out.result.cagr_pct, expected);
    }

    #[test]
    fn test_amortizing_fractional_years() {
        let input = GrowthInput {
            mode: GrowthMode::Amortizing,
            principal: dec!(60_000),
            annual_rate_pct: dec!(12),
            periods: 18,
            inflation_rate_pct: dec!(6),
        };
        let out = compute_growth(&input).unwrap();
        assert_eq!(out.result.years, dec!(1.5));
        assert!(out.result.real_value < out.result.total_amount);
        assert!(out.result.cagr_pct > Decimal::ZERO);
    }

    #[test]
    fn test_rejects_non_positive_principal() {
        let err = compute_growth(&lump(Decimal::ZERO, dec!(10), 5, dec!(5))).unwrap_err();
        assert!(matches!(err, CreditAnchorError::InvalidInput { .. }));
    }

    #[test]
    fn test_rejects_zero_periods() {
        assert!(compute_growth(&lump(dec!(1_000), dec!(10), 0, dec!(5))).is_err());
    }

    #[test]
    fn test_future_value_overflow_is_an_error() {
        let principal = dec!(10_000_000_000_000_000_000_000_000_000);
        let err = compute_growth(&lump(principal, dec!(10), 50, Decimal::ZERO)).unwrap_err();
        assert!(matches!(err, CreditAnchorError::FinancialImpossibility(_)));
    }

    #[test]
    fn test_mode_accepts_dashboard_aliases() {
        let m: GrowthMode = serde_json::from_str("\"loan\"").unwrap();
        assert_eq!(m, GrowthMode::LumpSum);
        let m: GrowthMode = serde_json::from_str("\"emi\"").unwrap();
        assert_eq!(m, GrowthMode::Amortizing);
    }
}
