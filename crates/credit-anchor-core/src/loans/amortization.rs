use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CreditAnchorError;
use crate::parse::{parse_decimal, parse_periods};
use crate::time_value::{compound, monthly_rate};
use crate::types::{Money, Percent, Rate};
use crate::CreditAnchorResult;

/// Fixed-rate installment schedule summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// Amount borrowed (echoed back).
    pub principal: Money,
    /// Number of installments.
    pub number_of_periods: u32,
    /// Periodic rate applied (decimal, per installment).
    pub periodic_rate: Rate,
    /// Equated installment per period.
    pub emi: Money,
    /// Interest paid over the whole tenure.
    pub total_interest: Money,
    /// Sum of all installments.
    pub total_payable: Money,
}

/// JSON shape of an EMI request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiInput {
    pub principal: Money,
    pub annual_rate_pct: Percent,
    #[serde(alias = "months", alias = "tenure_months")]
    pub number_of_periods: u32,
}

impl EmiInput {
    pub fn compute(&self) -> CreditAnchorResult<AmortizationResult> {
        compute_emi(self.principal, self.annual_rate_pct, self.number_of_periods)
    }
}

/// EMI for an annual percentage rate and a tenure in months.
pub fn compute_emi(
    principal: Money,
    annual_rate_pct: Percent,
    number_of_periods: u32,
) -> CreditAnchorResult<AmortizationResult> {
    if annual_rate_pct < Decimal::ZERO {
        return Err(CreditAnchorError::invalid(
            "annual_rate_pct",
            "Interest rate cannot be negative.",
        ));
    }
    compute_emi_with_rate(principal, monthly_rate(annual_rate_pct), number_of_periods)
}

/// EMI for a caller-supplied periodic rate (already divided per period).
///
/// Reducing-balance annuity: `P·r·(1+r)^n / ((1+r)^n − 1)`. A zero rate is
/// amortised straight-line before the general formula is reached.
pub fn compute_emi_with_rate(
    principal: Money,
    periodic_rate: Rate,
    number_of_periods: u32,
) -> CreditAnchorResult<AmortizationResult> {
    validate(principal, periodic_rate, number_of_periods)?;
    let n = Decimal::from(number_of_periods);

    if periodic_rate.is_zero() {
        return Ok(AmortizationResult {
            principal,
            number_of_periods,
            periodic_rate,
            emi: principal / n,
            total_interest: Decimal::ZERO,
            total_payable: principal,
        });
    }

    let factor = compound(periodic_rate, number_of_periods)?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(CreditAnchorError::DivisionByZero {
            context: "EMI annuity factor".into(),
        });
    }

    let emi = principal
        .checked_mul(periodic_rate)
        .and_then(|v| v.checked_mul(factor))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| {
            CreditAnchorError::FinancialImpossibility("EMI overflows the decimal range".into())
        })?;
    let total_payable = emi.checked_mul(n).ok_or_else(|| {
        CreditAnchorError::FinancialImpossibility("Total payable overflows the decimal range".into())
    })?;

    Ok(AmortizationResult {
        principal,
        number_of_periods,
        periodic_rate,
        emi,
        total_interest: total_payable - principal,
        total_payable,
    })
}

/// Strict entry point for raw form strings; non-numeric fields are rejected.
pub fn compute_emi_from_strings(
    principal: &str,
    annual_rate_pct: &str,
    number_of_periods: &str,
) -> CreditAnchorResult<AmortizationResult> {
    let principal = parse_decimal("principal", principal)?;
    let rate = parse_decimal("annual_rate_pct", annual_rate_pct)?;
    let periods = parse_periods("number_of_periods", number_of_periods)?;
    compute_emi(principal, rate, periods)
}

fn validate(principal: Money, periodic_rate: Rate, number_of_periods: u32) -> CreditAnchorResult<()> {
    if principal < Decimal::ZERO {
        return Err(CreditAnchorError::invalid(
            "principal",
            "Principal cannot be negative.",
        ));
    }
    if number_of_periods == 0 {
        return Err(CreditAnchorError::invalid(
            "number_of_periods",
            "Number of periods must be > 0",
        ));
    }
    if periodic_rate < Decimal::ZERO {
        return Err(CreditAnchorError::invalid(
            "periodic_rate",
            "Periodic rate cannot be negative.",
        ));
    }
    Ok(())
}
