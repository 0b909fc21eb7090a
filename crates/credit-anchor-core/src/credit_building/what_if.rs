use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{CreditScore, Money, CREDIT_SCORE_MAX, CREDIT_SCORE_MIN};

pub const DEFAULT_BASELINE_SCORE: CreditScore = 735;

/// Score points earned per 1,000 of debt paid off.
const PAYOFF_PER_POINT: Decimal = dec!(1000);
const PAYOFF_BONUS_CAP: Decimal = dec!(20);
const MISSED_PAYMENT_PENALTY: Decimal = dec!(50);
const NEW_LOAN_PENALTY: Decimal = dec!(10);

fn default_baseline() -> CreditScore {
    DEFAULT_BASELINE_SCORE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatIfInput {
    #[serde(default = "default_baseline")]
    pub baseline_score: CreditScore,
    #[serde(default)]
    pub payoff_amount: Money,
    #[serde(default)]
    pub missed_payment: bool,
    #[serde(default)]
    pub new_loan: bool,
}

impl Default for WhatIfInput {
    fn default() -> Self {
        WhatIfInput {
            baseline_score: DEFAULT_BASELINE_SCORE,
            payoff_amount: Decimal::ZERO,
            missed_payment: false,
            new_loan: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreEffect {
    PayoffBonus,
    MissedPaymentPenalty,
    NewLoanPenalty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreAdjustment {
    pub effect: ScoreEffect,
    /// Signed, unrounded contribution.
    pub points: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationDelta {
    pub baseline_score: CreditScore,
    /// Applied effects in evaluation order: payoff, missed payment, new loan.
    pub adjustments: Vec<ScoreAdjustment>,
    pub simulated_score: CreditScore,
    /// Signed; wide enough for any `u32` baseline.
    pub delta: i64,
}

/// Apply what-if events to a baseline bureau score.
///
/// The result is rounded half away from zero and clamped to the 300-900
/// bureau scale. A non-positive payoff earns no bonus.
pub fn simulate(input: &WhatIfInput) -> SimulationDelta {
    let mut adjustments = Vec::new();

    if input.payoff_amount > Decimal::ZERO {
        let bonus = (input.payoff_amount / PAYOFF_PER_POINT).min(PAYOFF_BONUS_CAP);
        adjustments.push(ScoreAdjustment {
            effect: ScoreEffect::PayoffBonus,
            points: bonus,
        });
    }
    if input.missed_payment {
        adjustments.push(ScoreAdjustment {
            effect: ScoreEffect::MissedPaymentPenalty,
            points: -MISSED_PAYMENT_PENALTY,
        });
    }
    if input.new_loan {
        adjustments.push(ScoreAdjustment {
            effect: ScoreEffect::NewLoanPenalty,
            points: -NEW_LOAN_PENALTY,
        });
    }

    let raw = Decimal::from(input.baseline_score)
        + adjustments.iter().map(|a| a.points).sum::<Decimal>();
    let rounded = raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let simulated_score = clamp_to_scale(rounded);

    SimulationDelta {
        baseline_score: input.baseline_score,
        adjustments,
        simulated_score,
        delta: i64::from(simulated_score) - i64::from(input.baseline_score),
    }
}

fn clamp_to_scale(score: Decimal) -> CreditScore {
    let min = Decimal::from(CREDIT_SCORE_MIN);
    let max = Decimal::from(CREDIT_SCORE_MAX);
    score
        .max(min)
        .min(max)
        .to_u32()
        .unwrap_or(CREDIT_SCORE_MIN)
}
