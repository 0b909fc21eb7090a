use credit_anchor_core::loans::{amortization, comparison, eligibility, true_cost};
use credit_anchor_core::CreditAnchorError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Amortization
// ===========================================================================

#[test]
fn test_home_loan_emi() {
    // 10L at 12% over 10 years
    let r = amortization::compute_emi(dec!(1_000_000), dec!(12), 120).unwrap();
    assert!((r.emi - dec!(14347.09)).abs() < dec!(0.01), "emi={}", r.emi);
    assert_eq!(r.total_payable, r.emi * dec!(120));
    assert_eq!(r.total_interest, r.total_payable - dec!(1_000_000));
    assert!(r.total_interest > Decimal::ZERO);
}

#[test]
fn test_zero_rate_emi_is_straight_division() {
    let r = amortization::compute_emi(dec!(120_000), Decimal::ZERO, 24).unwrap();
    assert_eq!(r.emi, dec!(5_000));
    assert_eq!(r.total_interest, Decimal::ZERO);
    assert_eq!(r.total_payable, dec!(120_000));
}

#[test]
fn test_emi_from_form_strings() {
    let typed = amortization::compute_emi(dec!(250_000), dec!(10.5), 36).unwrap();
    let parsed = amortization::compute_emi_from_strings("2,50,000", " 10.5 ", "36").unwrap();
    assert_eq!(parsed, typed);
}

#[test]
fn test_emi_rejects_non_numeric_principal() {
    let err = amortization::compute_emi_from_strings("ten lakh", "12", "120").unwrap_err();
    assert!(matches!(err, CreditAnchorError::InvalidInput { .. }));
}

// ===========================================================================
// True cost
// ===========================================================================

#[test]
fn test_true_cost_without_fees_matches_emi() {
    let terms = true_cost::LoanTerms {
        principal: dec!(800_000),
        annual_rate_pct: dec!(8.75),
        tenure_years: 7,
        ..Default::default()
    };
    let out = true_cost::compute_true_cost(&terms);
    let emi = amortization::compute_emi(dec!(800_000), dec!(8.75), 84).unwrap();
    assert_eq!(out.result.breakdown.total_cost, emi.total_payable);
    assert_eq!(out.result.breakdown.total_fees, Decimal::ZERO);
}

#[test]
fn test_true_cost_components_sum_to_total() {
    let terms = true_cost::LoanTerms {
        principal: dec!(500_000),
        annual_rate_pct: dec!(12.5),
        tenure_years: 5,
        processing_fee: dec!(5_000),
        insurance: dec!(15_000),
        prepayment_charge: dec!(25_000),
        other_charges: dec!(2_000),
    };
    let out = true_cost::compute_true_cost(&terms);
    let sum: Decimal = out.result.components.iter().map(|c| c.amount).sum();
    assert!((sum - out.result.breakdown.total_cost).abs() < dec!(0.000001));
}

#[test]
fn test_true_cost_never_fails_on_blank_form() {
    let out = true_cost::compute_true_cost(&true_cost::LoanTerms::default());
    assert!(out.result.breakdown.is_zeroed());
    assert!(!out.warnings.is_empty());
}

// ===========================================================================
// Eligibility and comparison
// ===========================================================================

#[test]
fn test_eligibility_five_times_disposable() {
    let input = eligibility::EligibilityInput {
        loan_amount: dec!(150_000),
        annual_rate_pct: dec!(11),
        tenure_years: 3,
        monthly_income: dec!(80_000),
        monthly_expenses: dec!(45_000),
    };
    let out = eligibility::assess_eligibility(&input).unwrap().result;
    assert_eq!(out.disposable_income, dec!(35_000));
    assert_eq!(out.eligible_amount, dec!(175_000));
    assert!(out.eligible);
    assert!(out.within_limit);
    assert!(out.emi_to_income_pct.is_some());
}

#[test]
fn test_compare_ranks_cheapest_first() {
    let input = comparison::ComparisonInput {
        offers: vec![
            comparison::LoanOffer {
                lender: "NBFC B".into(),
                annual_rate_pct: dec!(13),
                emi: dec!(17_000),
                tenure_months: 36,
            },
            comparison::LoanOffer {
                lender: "Bank A".into(),
                annual_rate_pct: dec!(11.5),
                emi: dec!(16_200),
                tenure_months: 36,
            },
        ],
    };
    let out = comparison::compare_loans(&input).unwrap().result;
    let lenders: Vec<&str> = out.ranked.iter().map(|o| o.lender.as_str()).collect();
    assert_eq!(lenders, vec!["Bank A", "NBFC B"]);
    assert_eq!(out.savings_vs_costliest, dec!(28_800));
}
