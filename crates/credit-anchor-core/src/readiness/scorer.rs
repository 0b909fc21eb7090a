//! Credit-readiness score for applicants without a bureau history.
//!
//! A 0-100 heuristic built from five independently evaluated buckets:
//!
//! | bucket     | max | keyed on                                   |
//! |------------|-----|--------------------------------------------|
//! | income     | 30  | monthly income                             |
//! | savings    | 25  | savings / income                           |
//! | expenses   | 20  | expenses / income (lower is better)        |
//! | employment | 15  | employment type                            |
//! | other      | 10  | age, dependents, residence, education      |
//!
//! Scoring never fails: ratios against a zero income are taken as 0.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::readiness::profile::{
    EducationLevel, EmploymentType, FinancialProfile, ProfileForm, ResidenceType,
};
use crate::types::{ratio_or_zero, saturating_ratio, with_metadata, ComputationOutput};

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

pub const INCOME_MAX: u32 = 30;
pub const SAVINGS_MAX: u32 = 25;
pub const EXPENSES_MAX: u32 = 20;
pub const EMPLOYMENT_MAX: u32 = 15;
pub const OTHER_MAX: u32 = 10;
pub const SCORE_MAX: u32 = 100;

/// Monthly income at or above the threshold earns the points.
const INCOME_BANDS: [(Decimal, u32); 5] = [
    (dec!(100000), 30),
    (dec!(75000), 25),
    (dec!(50000), 20),
    (dec!(30000), 15),
    (dec!(15000), 10),
];
const INCOME_FLOOR: u32 = 5;

/// Savings-to-income ratio at or above the threshold earns the points.
const SAVINGS_BANDS: [(Decimal, u32); 4] = [
    (dec!(0.5), 25),
    (dec!(0.3), 20),
    (dec!(0.2), 15),
    (dec!(0.1), 10),
];
const SAVINGS_FLOOR: u32 = 5;

/// Expense-to-income ratio at or below the threshold earns the points.
const EXPENSE_BANDS: [(Decimal, u32); 4] = [
    (dec!(0.3), 20),
    (dec!(0.4), 15),
    (dec!(0.5), 12),
    (dec!(0.6), 8),
];
const EXPENSE_FLOOR: u32 = 5;

const EMPLOYMENT_POINTS: [(EmploymentType, u32); 4] = [
    (EmploymentType::Government, 15),
    (EmploymentType::Salaried, 12),
    (EmploymentType::SelfEmployed, 10),
    (EmploymentType::BusinessOwner, 8),
];
const EMPLOYMENT_FLOOR: u32 = 5;

/// Inclusive age ranges, checked in order.
const AGE_BANDS: [(u32, u32, u32); 2] = [(25, 55, 3), (21, 60, 2)];
const AGE_FLOOR: u32 = 1;

/// Dependents at or below the count earn the points.
const DEPENDENT_BANDS: [(u32, u32); 2] = [(2, 2), (4, 1)];

const RESIDENCE_POINTS: [(ResidenceType, u32); 2] =
    [(ResidenceType::Owned, 2), (ResidenceType::Rented, 1)];

const EDUCATION_POINTS: [(EducationLevel, u32); 2] = [
    (EducationLevel::PostGraduate, 2),
    (EducationLevel::Graduate, 1),
];

// Recommendation triggers: a bucket below its threshold adds a tip.
const INCOME_TIP_BELOW: u32 = 15;
const SAVINGS_TIP_BELOW: u32 = 15;
const EXPENSES_TIP_BELOW: u32 = 12;
const EMPLOYMENT_TIP_BELOW: u32 = 10;

const INCOME_TIP: &str =
    "Consider increasing your income through side hustles or skill development";
const SAVINGS_TIP: &str = "Build an emergency fund of at least 3-6 months of expenses";
const EXPENSES_TIP: &str =
    "Track and reduce unnecessary expenses to improve your financial health";
const EMPLOYMENT_TIP: &str = "Consider stable employment options for better credit prospects";

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub income: u32,
    pub savings: u32,
    pub expenses: u32,
    pub employment: u32,
    pub other: u32,
}

impl ScoreBreakdown {
    /// Sum of the buckets, clamped to 0..=100.
    pub fn total(&self) -> u32 {
        (self.income + self.savings + self.expenses + self.employment + self.other).min(SCORE_MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessTier {
    /// Below 50.
    Building,
    /// 50 to 69.
    OnTrack,
    /// 70 and above.
    Ready,
}

impl ReadinessTier {
    pub fn for_score(score: u32) -> Self {
        if score < 50 {
            ReadinessTier::Building
        } else if score < 70 {
            ReadinessTier::OnTrack
        } else {
            ReadinessTier::Ready
        }
    }

    pub fn closing_remark(&self) -> &'static str {
        match self {
            ReadinessTier::Building => {
                "Start with secured credit cards to build credit history; pay all bills on time and maintain low utilization"
            }
            ReadinessTier::OnTrack => {
                "You're on the right track! Continue building good financial habits"
            }
            ReadinessTier::Ready => {
                "Excellent financial foundation! Consider applying for credit products"
            }
        }
    }
}

impl std::fmt::Display for ReadinessTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadinessTier::Building => write!(f, "Building"),
            ReadinessTier::OnTrack => write!(f, "On Track"),
            ReadinessTier::Ready => write!(f, "Ready"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessOutput {
    pub breakdown: ScoreBreakdown,
    pub total_score: u32,
    pub tier: ReadinessTier,
    /// Bucket warnings in bucket order, then one tier remark.
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn score_profile(profile: &FinancialProfile) -> ComputationOutput<ReadinessOutput> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if profile.monthly_income <= Decimal::ZERO {
        warnings.push(
            "Monthly income is zero or missing; savings and expense ratios are taken as 0.".into(),
        );
    }
    let income = profile.monthly_income;
    if saturating_ratio(profile.savings_amount, income).1
        || saturating_ratio(profile.monthly_expenses, income).1
    {
        warnings.push(
            "Savings or expenses dwarf monthly income; the ratio is capped at the numeric limit."
                .into(),
        );
    }

    let breakdown = score_breakdown(profile);
    let total_score = breakdown.total();
    let tier = ReadinessTier::for_score(total_score);
    let recommendations = recommendations(&breakdown, tier);

    let output = ReadinessOutput {
        breakdown,
        total_score,
        tier,
        recommendations,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "weights": {
            "income": INCOME_MAX,
            "savings": SAVINGS_MAX,
            "expenses": EXPENSES_MAX,
            "employment": EMPLOYMENT_MAX,
            "other": OTHER_MAX,
        },
        "zero_income_ratio": 0,
        "tiers": { "building": "< 50", "on_track": "50-69", "ready": ">= 70" },
    });

    with_metadata(
        "Bucketed credit-readiness rules",
        &assumptions,
        warnings,
        elapsed,
        output,
    )
}

/// Score raw wizard input; unparseable numbers count as zero.
pub fn score_form(form: &ProfileForm) -> ComputationOutput<ReadinessOutput> {
    score_profile(&FinancialProfile::from(form))
}

pub fn score_breakdown(profile: &FinancialProfile) -> ScoreBreakdown {
    let income = profile.monthly_income;
    ScoreBreakdown {
        income: band_at_least(&INCOME_BANDS, income, INCOME_FLOOR),
        savings: band_at_least(
            &SAVINGS_BANDS,
            ratio_or_zero(profile.savings_amount, income),
            SAVINGS_FLOOR,
        ),
        expenses: band_at_most(
            &EXPENSE_BANDS,
            ratio_or_zero(profile.monthly_expenses, income),
            EXPENSE_FLOOR,
        ),
        employment: lookup(&EMPLOYMENT_POINTS, profile.employment_type).unwrap_or(EMPLOYMENT_FLOOR),
        other: other_points(profile),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn band_at_least(bands: &[(Decimal, u32)], value: Decimal, floor: u32) -> u32 {
    bands
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(floor)
}

fn band_at_most(bands: &[(Decimal, u32)], value: Decimal, floor: u32) -> u32 {
    bands
        .iter()
        .find(|(threshold, _)| value <= *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(floor)
}

fn lookup<K: PartialEq + Copy>(table: &[(K, u32)], key: K) -> Option<u32> {
    table.iter().find(|(k, _)| *k == key).map(|(_, p)| *p)
}

fn other_points(profile: &FinancialProfile) -> u32 {
    let age = AGE_BANDS
        .iter()
        .find(|(lo, hi, _)| (*lo..=*hi).contains(&profile.age))
        .map(|(_, _, points)| *points)
        .unwrap_or(AGE_FLOOR);
    let dependents = DEPENDENT_BANDS
        .iter()
        .find(|(max, _)| profile.dependents <= *max)
        .map(|(_, points)| *points)
        .unwrap_or(0);
    let residence = lookup(&RESIDENCE_POINTS, profile.residence_type).unwrap_or(0);
    let education = lookup(&EDUCATION_POINTS, profile.education_level).unwrap_or(0);

    (age + dependents + residence + education).min(OTHER_MAX)
}

fn recommendations(breakdown: &ScoreBreakdown, tier: ReadinessTier) -> Vec<String> {
    let checks = [
        (breakdown.income < INCOME_TIP_BELOW, INCOME_TIP),
        (breakdown.savings < SAVINGS_TIP_BELOW, SAVINGS_TIP),
        (breakdown.expenses < EXPENSES_TIP_BELOW, EXPENSES_TIP),
        (breakdown.employment < EMPLOYMENT_TIP_BELOW, EMPLOYMENT_TIP),
    ];
    checks
        .iter()
        .filter(|(triggered, _)| *triggered)
        .map(|(_, tip)| tip.to_string())
        .chain(std::iter::once(tier.closing_remark().to_string()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
