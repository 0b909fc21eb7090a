use chrono::NaiveDate;
use credit_anchor_core::credit_health::report::{
    build_health_report, HealthReportInput, ScoreBand,
};
use credit_anchor_core::credit_health::tracking::{analyze_history, ScoreObservation, Trend};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

#[test]
fn test_report_ratios() {
    let out = build_health_report(&HealthReportInput {
        monthly_income: dec!(80_000),
        monthly_expenses: dec!(60_000),
        total_debt: dec!(40_000),
        savings: dec!(4_000),
        credit_score: Some(700),
    })
    .result;
    assert_eq!(out.score_band, Some(ScoreBand::Good));
    assert_eq!(out.dti_pct, dec!(50));
    assert_eq!(out.savings_rate_pct, dec!(5));
    // expenses 75%, DTI 50%, savings 5%: three targeted tips plus three standing ones
    assert_eq!(out.recommendations.len(), 6);
}

#[test]
fn test_score_history_from_json() {
    let history: Vec<ScoreObservation> = serde_json::from_str(
        r#"[
            {"date": "2024-04-01", "score": 712},
            {"date": "2024-01-01", "score": 690},
            {"date": "2024-07-01", "score": 751}
        ]"#,
    )
    .unwrap();
    let out = analyze_history(&history).unwrap().result;
    assert_eq!(out.first_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(out.current_score, 751);
    assert_eq!(out.change, 61);
    assert_eq!(out.trend, Trend::Improved);
    assert_eq!(out.observations, 3);
}
