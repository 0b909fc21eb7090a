use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{
    ratio_or_zero, ratio_pct, with_metadata, ComputationOutput, CreditScore, Money, Percent,
    CREDIT_SCORE_MAX, CREDIT_SCORE_MIN,
};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthReportInput {
    pub monthly_income: Money,
    pub monthly_expenses: Money,
    pub total_debt: Money,
    pub savings: Money,
    pub credit_score: Option<CreditScore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn for_score(score: CreditScore) -> Self {
        match score {
            s if s >= 750 => ScoreBand::Excellent,
            s if s >= 650 => ScoreBand::Good,
            s if s >= 550 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub credit_score: Option<CreditScore>,
    pub score_band: Option<ScoreBand>,
    /// total_debt / monthly_income x 100
    pub dti_pct: Percent,
    /// savings / monthly_income x 100
    pub savings_rate_pct: Percent,
    /// monthly_expenses / monthly_income x 100
    pub expense_ratio_pct: Percent,
    pub recommendations: Vec<String>,
}

const HIGH_EXPENSE_RATIO: Decimal = dec!(0.7);
const HIGH_DTI: Decimal = dec!(0.4);
const MIN_SAVINGS_SHARE: Decimal = dec!(0.1);
const SCORE_FOCUS_BELOW: CreditScore = 650;

const STANDING_TIPS: [&str; 3] = [
    "Regularly monitor your credit report for accuracy",
    "Consider diversifying your credit mix for better scores",
    "Maintain low credit utilization (below 30%)",
];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Summarise income, debt and savings into ratios and advice.
///
/// Never fails. Ratios against a non-positive income are 0; a score outside
/// the bureau scale is reported as a warning and left unbanded.
pub fn build_health_report(input: &HealthReportInput) -> ComputationOutput<HealthReport> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let income = input.monthly_income;
    if income <= Decimal::ZERO {
        warnings.push("Monthly income is zero or missing; ratios are reported as 0.".into());
    }

    let score_band = match input.credit_score {
        Some(s) if (CREDIT_SCORE_MIN..=CREDIT_SCORE_MAX).contains(&s) => {
            Some(ScoreBand::for_score(s))
        }
        Some(s) => {
            warnings.push(format!(
                "Credit score {s} is outside {CREDIT_SCORE_MIN}-{CREDIT_SCORE_MAX}; not banded."
            ));
            None
        }
        None => None,
    };

    let (dti_pct, dti_capped) = ratio_pct(input.total_debt, income);
    let (savings_rate_pct, savings_capped) = ratio_pct(input.savings, income);
    let (expense_ratio_pct, expense_capped) = ratio_pct(input.monthly_expenses, income);
    if dti_capped || savings_capped || expense_capped {
        warnings.push(
            "Debt, savings or expenses dwarf monthly income; ratios are capped at the numeric limit."
                .into(),
        );
    }

    let report = HealthReport {
        credit_score: input.credit_score,
        score_band,
        dti_pct,
        savings_rate_pct,
        expense_ratio_pct,
        recommendations: recommendations(input),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "score_bands": { "excellent": 750, "good": 650, "fair": 550 },
        "high_expense_ratio": HIGH_EXPENSE_RATIO.to_string(),
        "high_dti": HIGH_DTI.to_string(),
        "min_savings_share": MIN_SAVINGS_SHARE.to_string(),
    });

    with_metadata(
        "Credit health ratios and recommendations",
        &assumptions,
        warnings,
        elapsed,
        report,
    )
}

fn recommendations(input: &HealthReportInput) -> Vec<String> {
    let income = input.monthly_income;
    let has_income = income > Decimal::ZERO;
    let mut recs: Vec<String> = Vec::new();

    if has_income
        && input.monthly_expenses > Decimal::ZERO
        && ratio_or_zero(input.monthly_expenses, income) > HIGH_EXPENSE_RATIO
    {
        recs.push("Consider reducing monthly expenses to improve financial health".into());
    }
    if has_income
        && input.total_debt > Decimal::ZERO
        && ratio_or_zero(input.total_debt, income) > HIGH_DTI
    {
        recs.push(
            "High debt-to-income ratio detected. Consider debt consolidation or reduction strategies"
                .into(),
        );
    }
    if input.savings < income * MIN_SAVINGS_SHARE {
        recs.push("Build an emergency fund of at least 3-6 months of expenses".into());
    }
    if matches!(input.credit_score, Some(s) if s < SCORE_FOCUS_BELOW) {
        recs.push(
            "Focus on improving credit score through timely payments and low utilization".into(),
        );
    }

    recs.extend(STANDING_TIPS.iter().map(|t| t.to_string()));
    recs
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
