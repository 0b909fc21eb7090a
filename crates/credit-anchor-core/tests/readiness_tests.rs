use credit_anchor_core::readiness::profile::{
    EducationLevel, EmploymentType, FinancialProfile, ProfileForm, ResidenceType,
};
use credit_anchor_core::readiness::scorer::{score_form, score_profile, ReadinessTier};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

#[test]
fn test_total_stays_in_range_for_extreme_incomes() {
    for income in [dec!(-1_000_000), dec!(0), dec!(1), dec!(1_000_000_000)] {
        let p = FinancialProfile {
            monthly_income: income,
            monthly_expenses: dec!(500),
            savings_amount: dec!(1_000_000),
            ..FinancialProfile::default()
        };
        let total = score_profile(&p).result.total_score;
        assert!(total <= 100, "income={income} total={total}");
    }
}

#[test]
fn test_form_at_decimal_limits_still_scores() {
    let form = ProfileForm {
        monthly_income: "0.0000001".into(),
        savings_amount: "79228162514264337593543950335".into(),
        monthly_expenses: "79228162514264337593543950335".into(),
        ..ProfileForm::default()
    };
    let out = score_form(&form);
    assert!(out.result.total_score <= 100);
    assert_eq!(out.result.breakdown.savings, 25);
    assert_eq!(out.result.breakdown.expenses, 5);
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn test_typical_salaried_applicant() {
    let p = FinancialProfile {
        monthly_income: dec!(60_000),
        monthly_expenses: dec!(27_000),
        savings_amount: dec!(15_000),
        employment_type: EmploymentType::Salaried,
        dependents: 2,
        residence_type: ResidenceType::Rented,
        education_level: EducationLevel::Graduate,
        age: 29,
    };
    let out = score_profile(&p).result;
    // savings ratio 0.25, expense ratio 0.45
    assert_eq!(out.breakdown.income, 20);
    assert_eq!(out.breakdown.savings, 15);
    assert_eq!(out.breakdown.expenses, 12);
    assert_eq!(out.breakdown.employment, 12);
    assert_eq!(out.breakdown.other, 7);
    assert_eq!(out.total_score, 66);
    assert_eq!(out.tier, ReadinessTier::OnTrack);
    assert_eq!(out.recommendations.len(), 1);
}

#[test]
fn test_blank_wizard_scores_without_failing() {
    let out = score_form(&ProfileForm::default());
    // income 5, savings 5, expenses 20, employment 5, other 3 (age 1 + no dependents 2)
    assert_eq!(out.result.total_score, 38);
    assert_eq!(out.result.tier, ReadinessTier::Building);
    assert!(!out.warnings.is_empty());
}

#[test]
fn test_form_json_from_dashboard() {
    let form: ProfileForm = serde_json::from_str(
        r#"{
            "monthly_income": "1,20,000",
            "monthly_expenses": 30000,
            "savings_amount": "70000",
            "employment_type": "government",
            "dependents": "0",
            "residence_type": "owned",
            "education_level": "post-graduate",
            "age": "40"
        }"#,
    )
    .unwrap();
    let out = score_form(&form).result;
    assert_eq!(out.breakdown.income, 30);
    assert_eq!(out.breakdown.savings, 25);
    assert_eq!(out.tier, ReadinessTier::Ready);
}
