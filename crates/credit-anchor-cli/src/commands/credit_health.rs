use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use credit_anchor_core::credit_health::report::{self, HealthReportInput};
use credit_anchor_core::credit_health::tracking::{self, ScoreObservation};

use super::{emit, CommandResult};
use crate::input;

/// Arguments for the credit health report
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct HealthReportArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub monthly_income: Option<Decimal>,

    /// Annual income, used when --monthly-income is absent
    #[arg(long, conflicts_with = "monthly_income")]
    pub annual_income: Option<Decimal>,

    #[arg(long)]
    pub monthly_expenses: Option<Decimal>,

    /// Outstanding debt
    #[arg(long)]
    pub debt: Option<Decimal>,

    #[arg(long)]
    pub savings: Option<Decimal>,

    /// Current bureau score
    #[arg(long)]
    pub score: Option<u32>,
}

/// Arguments for score history analysis
#[derive(Args)]
pub struct ScoreTrendArgs {
    /// JSON file with [{"date": "YYYY-MM-DD", "score": N}, ...]
    #[arg(long)]
    pub input: Option<String>,

    /// Observation as YYYY-MM-DD=SCORE, repeatable
    #[arg(long = "point", value_parser = parse_observation)]
    pub points: Vec<ScoreObservation>,
}

pub fn run_health_report(args: HealthReportArgs) -> CommandResult {
    tracing::debug!(from_file = args.input.is_some(), "health-report");
    let request = match input::read_payload::<HealthReportInput>(args.input.as_deref())? {
        Some(request) => request,
        None => HealthReportInput {
            monthly_income: args
                .monthly_income
                .or_else(|| args.annual_income.map(|annual| annual / dec!(12)))
                .unwrap_or_default(),
            monthly_expenses: args.monthly_expenses.unwrap_or_default(),
            total_debt: args.debt.unwrap_or_default(),
            savings: args.savings.unwrap_or_default(),
            credit_score: args.score,
        },
    };
    emit("health-report", &report::build_health_report(&request))
}

pub fn run_score_trend(args: ScoreTrendArgs) -> CommandResult {
    let history: Vec<ScoreObservation> = if !args.points.is_empty() && args.input.is_none() {
        args.points
    } else {
        input::require_payload(args.input.as_deref(), "score-trend")?
    };
    tracing::debug!(observations = history.len(), "score-trend");
    emit("score-trend", &tracking::analyze_history(&history)?)
}

fn parse_observation(raw: &str) -> Result<ScoreObservation, String> {
    let (date, score) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected YYYY-MM-DD=SCORE, got '{raw}'"))?;
    Ok(ScoreObservation {
        date: NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|e| format!("bad date '{date}': {e}"))?,
        score: score
            .trim()
            .parse()
            .map_err(|e| format!("bad score '{score}': {e}"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_observation() {
        let obs = parse_observation("2024-02-29=731").unwrap();
        assert_eq!(obs.date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(obs.score, 731);
    }

    #[test]
    fn test_parse_observation_rejects_bad_date() {
        assert!(parse_observation("2023-02-29=731").is_err());
        assert!(parse_observation("2024-01-01").is_err());
    }
}
