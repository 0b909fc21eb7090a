use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CreditAnchorError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::CreditAnchorResult;

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

/// A quoted loan offer as entered by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanOffer {
    pub lender: String,
    pub annual_rate_pct: Percent,
    pub emi: Money,
    pub tenure_months: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInput {
    pub offers: Vec<LoanOffer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedOffer {
    /// 1 = cheapest.
    pub rank: usize,
    pub lender: String,
    pub annual_rate_pct: Percent,
    pub emi: Money,
    pub tenure_months: u32,
    /// emi x tenure_months
    pub total_cost: Money,
    /// Extra paid compared with the cheapest offer.
    pub premium_over_cheapest: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    pub ranked: Vec<RankedOffer>,
    pub cheapest_lender: String,
    /// Costliest total minus cheapest total.
    pub savings_vs_costliest: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Rank loan offers by total repayment (EMI x tenure), cheapest first.
///
/// Ties are broken by the lower rate, then by lender name, so the ranking is
/// stable for identical inputs.
pub fn compare_loans(
    input: &ComparisonInput,
) -> CreditAnchorResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();
    validate_offers(&input.offers)?;

    let mut costed: Vec<(&LoanOffer, Money)> = input
        .offers
        .iter()
        .map(|o| Ok((o, total_cost(o)?)))
        .collect::<CreditAnchorResult<_>>()?;

    costed.sort_by(|(a, cost_a), (b, cost_b)| {
        cost_a
            .cmp(cost_b)
            .then_with(|| a.annual_rate_pct.cmp(&b.annual_rate_pct))
            .then_with(|| a.lender.cmp(&b.lender))
    });

    let cheapest_cost = costed[0].1;
    let costliest_cost = costed[costed.len() - 1].1;

    let ranked: Vec<RankedOffer> = costed
        .iter()
        .enumerate()
        .map(|(i, (offer, total_cost))| RankedOffer {
            rank: i + 1,
            lender: offer.lender.clone(),
            annual_rate_pct: offer.annual_rate_pct,
            emi: offer.emi,
            tenure_months: offer.tenure_months,
            total_cost: *total_cost,
            premium_over_cheapest: *total_cost - cheapest_cost,
        })
        .collect();

    let mut warnings = Vec::new();
    if ranked.len() == 1 {
        warnings.push("Only one offer supplied; nothing to compare against.".to_string());
    }

    let output = ComparisonOutput {
        cheapest_lender: ranked[0].lender.clone(),
        savings_vs_costliest: costliest_cost - cheapest_cost,
        ranked,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "total_cost": "emi * tenure_months",
        "tie_break": ["annual_rate_pct", "lender"],
    });

    Ok(with_metadata(
        "Total repayment comparison",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

fn total_cost(offer: &LoanOffer) -> CreditAnchorResult<Money> {
    offer
        .emi
        .checked_mul(Decimal::from(offer.tenure_months))
        .ok_or_else(|| {
            CreditAnchorError::FinancialImpossibility(format!(
                "Total repayment for {} overflows the decimal range",
                offer.lender
            ))
        })
}

fn validate_offers(offers: &[LoanOffer]) -> CreditAnchorResult<()> {
    if offers.is_empty() {
        return Err(CreditAnchorError::InsufficientData(
            "At least one loan offer is required.".into(),
        ));
    }
    for offer in offers {
        if offer.lender.trim().is_empty() {
            return Err(CreditAnchorError::invalid("lender", "Lender name is required."));
        }
        if offer.emi < Decimal::ZERO {
            return Err(CreditAnchorError::invalid(
                "emi",
                format!("EMI for {} cannot be negative.", offer.lender),
            ));
        }
        if offer.annual_rate_pct < Decimal::ZERO {
            return Err(CreditAnchorError::invalid(
                "annual_rate_pct",
                format!("Rate for {} cannot be negative.", offer.lender),
            ));
        }
        if offer.tenure_months == 0 {
            return Err(CreditAnchorError::invalid(
                "tenure_months",
                format!("Tenure for {} must be at least one month.", offer.lender),
            ));
        }
    }
    Ok(())
}
