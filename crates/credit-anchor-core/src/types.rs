use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%).
pub type Rate = Decimal;

/// Percentages as entered on a form (12.5 = 12.5%).
pub type Percent = Decimal;

/// Bureau-style credit score on the 300-900 scale.
pub type CreditScore = u32;

/// Lowest score on the bureau scale.
pub const CREDIT_SCORE_MIN: CreditScore = 300;

/// Highest score on the bureau scale.
pub const CREDIT_SCORE_MAX: CreditScore = 900;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// `numerator / denominator`, or zero when the denominator is not positive.
///
/// Ratios against income treat a missing or zero income as "no ratio"
/// rather than letting the division blow up. A quotient past the Decimal
/// range saturates to `Decimal::MAX` (or `MIN` for a negative numerator).
pub fn ratio_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    saturating_ratio(numerator, denominator).0
}

/// Like [`ratio_or_zero`], also reporting whether the quotient saturated.
pub fn saturating_ratio(numerator: Decimal, denominator: Decimal) -> (Decimal, bool) {
    if denominator <= Decimal::ZERO {
        return (Decimal::ZERO, false);
    }
    match numerator.checked_div(denominator) {
        Some(q) => (q, false),
        None if numerator.is_sign_negative() => (Decimal::MIN, true),
        None => (Decimal::MAX, true),
    }
}

/// Ratio expressed as a percentage, saturating at the Decimal range.
pub fn ratio_pct(numerator: Decimal, denominator: Decimal) -> (Percent, bool) {
    let (ratio, saturated) = saturating_ratio(numerator, denominator);
    match ratio.checked_mul(Decimal::ONE_HUNDRED) {
        Some(pct) => (pct, saturated),
        None => (ratio.saturating_mul(Decimal::ONE_HUNDRED), true),
    }
}
