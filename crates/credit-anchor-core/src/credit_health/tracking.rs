use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CreditAnchorError;
use crate::types::{
    with_metadata, ComputationOutput, CreditScore, CREDIT_SCORE_MAX, CREDIT_SCORE_MIN,
};
use crate::CreditAnchorResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreObservation {
    pub date: NaiveDate,
    pub score: CreditScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreStatus {
    pub fn for_score(score: CreditScore) -> Self {
        match score {
            s if s >= 750 => ScoreStatus::Excellent,
            s if s >= 700 => ScoreStatus::Good,
            s if s >= 650 => ScoreStatus::Fair,
            _ => ScoreStatus::Poor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improved,
    Declined,
    Flat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreTrend {
    pub current_score: CreditScore,
    pub status: ScoreStatus,
    pub first_date: NaiveDate,
    pub latest_date: NaiveDate,
    /// Latest minus earliest.
    pub change: i32,
    pub trend: Trend,
    pub min_score: CreditScore,
    pub max_score: CreditScore,
    pub average_score: Decimal,
    pub observations: usize,
    /// Observations in date order.
    pub history: Vec<ScoreObservation>,
}

/// Summarise a bureau-score history. Input order does not matter.
pub fn analyze_history(
    history: &[ScoreObservation],
) -> CreditAnchorResult<ComputationOutput<ScoreTrend>> {
    let start = Instant::now();
    validate_history(history)?;

    let mut sorted = history.to_vec();
    sorted.sort_by_key(|o| o.date);

    let mut warnings = Vec::new();
    if sorted.windows(2).any(|w| w[0].date == w[1].date) {
        warnings.push("Multiple scores share a date; the later entry counts as latest.".into());
    }
    if sorted.len() == 1 {
        warnings.push("Only one observation; trend is flat.".into());
    }

    let earliest = sorted[0];
    let latest = sorted[sorted.len() - 1];
    let change = latest.score as i32 - earliest.score as i32;
    let trend = match change.signum() {
        1 => Trend::Improved,
        -1 => Trend::Declined,
        _ => Trend::Flat,
    };

    let scores = sorted.iter().map(|o| o.score);
    let min_score = scores.clone().min().unwrap_or(latest.score);
    let max_score = scores.clone().max().unwrap_or(latest.score);
    let sum: Decimal = scores.map(Decimal::from).sum();
    let average_score = sum / Decimal::from(sorted.len() as u64);

    let output = ScoreTrend {
        current_score: latest.score,
        status: ScoreStatus::for_score(latest.score),
        first_date: earliest.date,
        latest_date: latest.date,
        change,
        trend,
        min_score,
        max_score,
        average_score,
        observations: sorted.len(),
        history: sorted,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "status_bands": { "excellent": 750, "good": 700, "fair": 650 },
        "change": "latest - earliest by date",
    });

    Ok(with_metadata(
        "Credit score history summary",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

fn validate_history(history: &[ScoreObservation]) -> CreditAnchorResult<()> {
    if history.is_empty() {
        return Err(CreditAnchorError::InsufficientData(
            "At least one score observation is required.".into(),
        ));
    }
    if let Some(bad) = history
        .iter()
        .find(|o| !(CREDIT_SCORE_MIN..=CREDIT_SCORE_MAX).contains(&o.score))
    {
        return Err(CreditAnchorError::invalid(
            "score",
            format!(
                "Score {} on {} is outside {CREDIT_SCORE_MIN}-{CREDIT_SCORE_MAX}.",
                bad.score, bad.date
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn obs(y: i32, m: u32, d: u32, score: CreditScore) -> ScoreObservation {
        ScoreObservation {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            score,
        }
    }

    #[test]
    fn test_unsorted_history_is_ordered_by_date() {
        let history = vec![
            obs(2024, 3, 1, 720),
            obs(2024, 1, 1, 680),
            obs(2024, 2, 1, 700),
        ];
        let out = analyze_history(&history).unwrap();
        let r = &out.result;
        assert_eq!(r.current_score, 720);
        assert_eq!(r.change, 40);
        assert_eq!(r.trend, Trend::Improved);
        assert_eq!(r.status, ScoreStatus::Good);
        assert_eq!(r.min_score, 680);
        assert_eq!(r.max_score, 720);
        assert_eq!(r.average_score, dec!(700));
        assert_eq!(r.history[0].score, 680);
    }

    #[test]
    fn test_declining_history() {
        let out = analyze_history(&[obs(2024, 1, 1, 760), obs(2024, 6, 1, 640)]).unwrap();
        assert_eq!(out.result.trend, Trend::Declined);
        assert_eq!(out.result.change, -120);
        assert_eq!(out.result.status, ScoreStatus::Poor);
    }

    #[test]
    fn test_single_observation_is_flat() {
        let out = analyze_history(&[obs(2024, 1, 1, 655)]).unwrap();
        assert_eq!(out.result.trend, Trend::Flat);
        assert_eq!(out.result.status, ScoreStatus::Fair);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_empty_history_rejected() {
        assert!(matches!(
            analyze_history(&[]),
            Err(CreditAnchorError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_out_of_scale_score_rejected() {
        let err = analyze_history(&[obs(2024, 1, 1, 250)]).unwrap_err();
        assert!(matches!(err, CreditAnchorError::InvalidInput { .. }));
    }

    #[test]
    fn test_date_parses_from_iso_json() {
        let o: ScoreObservation =
            serde_json::from_str(r#"{"date": "2024-05-17", "score": 742}"#).unwrap();
        assert_eq!(o, obs(2024, 5, 17, 742));
    }
}
