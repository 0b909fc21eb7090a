//! Quick affordability check against disposable monthly income.
//!
//! The lender rule of thumb used on the dashboard: a borrower can service a
//! loan of up to five times their disposable monthly income.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::loans::amortization::{compute_emi, AmortizationResult};
use crate::error::CreditAnchorError;
use crate::time_value::MONTHS_PER_YEAR;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::CreditAnchorResult;

/// Multiple of disposable income a borrower is considered eligible for.
pub const DISPOSABLE_INCOME_MULTIPLE: Decimal = dec!(5);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EligibilityInput {
    #[serde(default)]
    pub loan_amount: Money,
    #[serde(default)]
    pub annual_rate_pct: Percent,
    #[serde(default)]
    pub tenure_years: u32,
    pub monthly_income: Money,
    pub monthly_expenses: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityOutput {
    /// income - expenses; may be negative.
    pub disposable_income: Money,
    /// 5x disposable income, floored at zero.
    pub eligible_amount: Money,
    pub eligible: bool,
    /// Installment for the requested loan, when one was requested.
    pub requested_emi: Option<AmortizationResult>,
    /// Requested loan is no larger than the eligible amount.
    pub within_limit: bool,
    /// Requested EMI as a percentage of monthly income.
    pub emi_to_income_pct: Option<Percent>,
}

pub fn assess_eligibility(
    input: &EligibilityInput,
) -> CreditAnchorResult<ComputationOutput<EligibilityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let disposable_income = input
        .monthly_income
        .checked_sub(input.monthly_expenses)
        .ok_or_else(|| overflow("Disposable income"))?;
    let raw_eligible = disposable_income
        .checked_mul(DISPOSABLE_INCOME_MULTIPLE)
        .ok_or_else(|| overflow("Eligible amount"))?;
    let eligible = raw_eligible > Decimal::ZERO;
    let eligible_amount = raw_eligible.max(Decimal::ZERO);

    if !eligible {
        warnings.push("Expenses meet or exceed income; no loan amount is serviceable.".into());
    }

    let requested_emi = if input.loan_amount > Decimal::ZERO && input.tenure_years > 0 {
        let periods = input
            .tenure_years
            .checked_mul(MONTHS_PER_YEAR)
            .ok_or_else(|| {
                CreditAnchorError::invalid(
                    "tenure_years",
                    format!("Tenure of {} years is too long to amortise.", input.tenure_years),
                )
            })?;
        Some(compute_emi(input.loan_amount, input.annual_rate_pct, periods)?)
    } else {
        None
    };

    let within_limit = eligible && input.loan_amount <= eligible_amount;

    let emi_to_income_pct = match &requested_emi {
        Some(r) if input.monthly_income > Decimal::ZERO => Some(
            r.emi
                .checked_div(input.monthly_income)
                .and_then(|v| v.checked_mul(dec!(100)))
                .ok_or_else(|| overflow("EMI-to-income ratio"))?,
        ),
        _ => None,
    };

    let output = EligibilityOutput {
        disposable_income,
        eligible_amount,
        eligible,
        requested_emi,
        within_limit,
        emi_to_income_pct,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "eligible_amount": "5 x (monthly_income - monthly_expenses)",
        "emi_periods": "tenure_years * 12",
    });

    Ok(with_metadata(
        "Disposable-income multiple",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

fn overflow(what: &str) -> CreditAnchorError {
    CreditAnchorError::FinancialImpossibility(format!("{what} overflows the decimal range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_input() -> EligibilityInput {
        EligibilityInput {
            loan_amount: dec!(100_000),
            annual_rate_pct: dec!(10),
            tenure_years: 2,
            monthly_income: dec!(60_000),
            monthly_expenses: dec!(35_000),
        }
    }

    #[test]
    fn test_eligible_amount_is_five_times_disposable() {
        let out = assess_eligibility(&base_input()).unwrap();
        assert_eq!(out.result.disposable_income, dec!(25_000));
        assert_eq!(out.result.eligible_amount, dec!(125_000));
        assert!(out.result.eligible);
        assert!(out.result.within_limit);
    }

    #[test]
    fn test_requested_emi_uses_monthly_periods() {
        let out = assess_eligibility(&base_input()).unwrap();
        let emi = out.result.requested_emi.unwrap();
        assert_eq!(emi.number_of_periods, 24);
        assert!(out.result.emi_to_income_pct.unwrap() > Decimal::ZERO);
    }

    #[test]
    fn test_overspending_is_not_eligible() {
        let mut input = base_input();
        input.monthly_expenses = dec!(70_000);
        let out = assess_eligibility(&input).unwrap();
        assert!(!out.result.eligible);
        assert_eq!(out.result.eligible_amount, Decimal::ZERO);
        assert_eq!(out.result.disposable_income, dec!(-10_000));
        assert!(!out.result.within_limit);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_no_requested_loan_skips_emi() {
        let input = EligibilityInput {
            monthly_income: dec!(40_000),
            monthly_expenses: dec!(10_000),
            ..EligibilityInput::default()
        };
        let out = assess_eligibility(&input).unwrap();
        assert!(out.result.requested_emi.is_none());
        assert!(out.result.emi_to_income_pct.is_none());
    }

    #[test]
    fn test_negative_rate_propagates_error() {
        let mut input = base_input();
        input.annual_rate_pct = dec!(-1);
        assert!(assess_eligibility(&input).is_err());
    }

    #[test]
    fn test_tenure_too_long_is_rejected() {
        let mut input = base_input();
        input.tenure_years = u32::MAX;
        let err = assess_eligibility(&input).unwrap_err();
        assert!(matches!(err, CreditAnchorError::InvalidInput { .. }));
    }

    #[test]
    fn test_eligible_amount_overflow_is_an_error() {
        let input = EligibilityInput {
            monthly_income: Decimal::MAX,
            ..EligibilityInput::default()
        };
        let err = assess_eligibility(&input).unwrap_err();
        assert!(matches!(err, CreditAnchorError::FinancialImpossibility(_)));
    }

    #[test]
    fn test_emi_to_income_overflow_is_an_error() {
        let mut input = base_input();
        input.monthly_income = dec!(0.0000000001);
        input.monthly_expenses = Decimal::ZERO;
        input.loan_amount = dec!(1_000_000_000_000_000_000_000);
        let err = assess_eligibility(&input).unwrap_err();
        assert!(matches!(err, CreditAnchorError::FinancialImpossibility(_)));
    }
}
