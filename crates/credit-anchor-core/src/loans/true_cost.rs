use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::loans::amortization::{compute_emi, AmortizationResult};
use crate::time_value::MONTHS_PER_YEAR;
use crate::types::{ratio_pct, with_metadata, ComputationOutput, Money, Percent};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Loan as entered on the true-cost form. Fees default to zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate_pct: Percent,
    pub tenure_years: u32,
    #[serde(default)]
    pub processing_fee: Money,
    #[serde(default)]
    pub insurance: Money,
    #[serde(default)]
    pub prepayment_charge: Money,
    #[serde(default)]
    pub other_charges: Money,
}

/// One slice of the total cost, in chart order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostComponent {
    pub label: String,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrueCostBreakdown {
    pub amortization: AmortizationResult,
    pub processing_fee: Money,
    pub insurance: Money,
    pub prepayment_charge: Money,
    pub other_charges: Money,
    pub total_fees: Money,
    /// total_payable + total_fees
    pub total_cost: Money,
}

/// Display ratios derived from a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrueCostInsights {
    /// Interest as a percentage of total cost.
    pub interest_share_pct: Percent,
    /// Fees as a percentage of total cost.
    pub fee_share_pct: Percent,
    /// Everything paid over the principal: total_cost - principal.
    pub extra_paid: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrueCostReport {
    pub breakdown: TrueCostBreakdown,
    pub components: Vec<CostComponent>,
    pub insights: TrueCostInsights,
}

impl TrueCostBreakdown {
    /// The "no result yet" state.
    pub fn zeroed() -> Self {
        TrueCostBreakdown {
            amortization: AmortizationResult {
                principal: Decimal::ZERO,
                number_of_periods: 0,
                periodic_rate: Decimal::ZERO,
                emi: Decimal::ZERO,
                total_interest: Decimal::ZERO,
                total_payable: Decimal::ZERO,
            },
            processing_fee: Decimal::ZERO,
            insurance: Decimal::ZERO,
            prepayment_charge: Decimal::ZERO,
            other_charges: Decimal::ZERO,
            total_fees: Decimal::ZERO,
            total_cost: Decimal::ZERO,
        }
    }

    pub fn is_zeroed(&self) -> bool {
        self.total_cost.is_zero() && self.amortization.number_of_periods == 0
    }

    pub fn insights(&self) -> TrueCostInsights {
        TrueCostInsights {
            interest_share_pct: ratio_pct(self.amortization.total_interest, self.total_cost).0,
            fee_share_pct: ratio_pct(self.total_fees, self.total_cost).0,
            extra_paid: self.total_cost - self.amortization.principal,
        }
    }

    pub fn components(&self) -> Vec<CostComponent> {
        [
            ("Principal", self.amortization.principal),
            ("Interest", self.amortization.total_interest),
            ("Processing Fee", self.processing_fee),
            ("Insurance", self.insurance),
            ("Prepayment", self.prepayment_charge),
            ("Other", self.other_charges),
        ]
        .into_iter()
        .map(|(label, amount)| CostComponent {
            label: label.to_string(),
            amount,
        })
        .collect()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Full cost of a loan: amortised repayments plus one-time fees.
///
/// Never fails. Unset principal, rate or tenure yields a zeroed breakdown;
/// negative fees count as zero. Both cases are reported as warnings.
pub fn compute_true_cost(terms: &LoanTerms) -> ComputationOutput<TrueCostReport> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let breakdown = build_breakdown(terms, &mut warnings);
    let report = TrueCostReport {
        components: breakdown.components(),
        insights: breakdown.insights(),
        breakdown,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "periods": "tenure_years * 12 monthly installments",
        "periodic_rate": "annual_rate_pct / 100 / 12",
        "extra_paid": "total_cost - principal",
        "fees": "one-time, not financed",
    });

    with_metadata(
        "Reducing-balance EMI plus one-time fees",
        &assumptions,
        warnings,
        elapsed,
        report,
    )
}

fn build_breakdown(terms: &LoanTerms, warnings: &mut Vec<String>) -> TrueCostBreakdown {
    if terms.principal <= Decimal::ZERO
        || terms.annual_rate_pct <= Decimal::ZERO
        || terms.tenure_years == 0
    {
        warnings.push(
            "Principal, interest rate and tenure must all be positive; returning an empty breakdown."
                .into(),
        );
        return TrueCostBreakdown::zeroed();
    }

    let periods = match terms.tenure_years.checked_mul(MONTHS_PER_YEAR) {
        Some(p) => p,
        None => {
            warnings.push("Tenure is too long to amortise; returning an empty breakdown.".into());
            return TrueCostBreakdown::zeroed();
        }
    };

    let amortization = match compute_emi(terms.principal, terms.annual_rate_pct, periods) {
        Ok(a) => a,
        Err(e) => {
            warnings.push(format!("{e}; returning an empty breakdown."));
            return TrueCostBreakdown::zeroed();
        }
    };

    let processing_fee = non_negative_fee("processing_fee", terms.processing_fee, warnings);
    let insurance = non_negative_fee("insurance", terms.insurance, warnings);
    let prepayment_charge = non_negative_fee("prepayment_charge", terms.prepayment_charge, warnings);
    let other_charges = non_negative_fee("other_charges", terms.other_charges, warnings);
    let totals = [insurance, prepayment_charge, other_charges]
        .into_iter()
        .try_fold(processing_fee, |acc, fee| acc.checked_add(fee))
        .and_then(|fees| {
            amortization
                .total_payable
                .checked_add(fees)
                .map(|cost| (fees, cost))
        });
    let (total_fees, total_cost) = match totals {
        Some(t) => t,
        None => {
            warnings.push("Fees are too large to total; returning an empty breakdown.".into());
            return TrueCostBreakdown::zeroed();
        }
    };

    TrueCostBreakdown {
        total_cost,
        amortization,
        processing_fee,
        insurance,
        prepayment_charge,
        other_charges,
        total_fees,
    }
}

fn non_negative_fee(field: &str, amount: Money, warnings: &mut Vec<String>) -> Money {
    if amount < Decimal::ZERO {
        warnings.push(format!("{field} is negative; treated as zero."));
        Decimal::ZERO
    } else {
        amount
    }
}
