use napi::Result as NapiResult;
use napi_derive::napi;

use credit_anchor_core::credit_building::{roadmap, what_if};
use credit_anchor_core::credit_health::{report, tracking};
use credit_anchor_core::loans::{amortization, comparison, eligibility, true_cost};
use credit_anchor_core::planning::growth;
use credit_anchor_core::readiness::{profile, scorer};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse<T: serde::de::DeserializeOwned>(input_json: &str) -> NapiResult<T> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

fn render<T: serde::Serialize>(output: &T) -> NapiResult<String> {
    serde_json::to_string(output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_emi(input_json: String) -> NapiResult<String> {
    let input: amortization::EmiInput = parse(&input_json)?;
    render(&input.compute().map_err(to_napi_error)?)
}

/// EMI straight from the calculator form fields.
#[napi]
pub fn compute_emi_from_form(
    principal: String,
    annual_rate_pct: String,
    months: String,
) -> NapiResult<String> {
    let output = amortization::compute_emi_from_strings(&principal, &annual_rate_pct, &months)
        .map_err(to_napi_error)?;
    render(&output)
}

#[napi]
pub fn loan_true_cost(input_json: String) -> NapiResult<String> {
    let input: true_cost::LoanTerms = parse(&input_json)?;
    render(&true_cost::compute_true_cost(&input))
}

#[napi]
pub fn loan_eligibility(input_json: String) -> NapiResult<String> {
    let input: eligibility::EligibilityInput = parse(&input_json)?;
    render(&eligibility::assess_eligibility(&input).map_err(to_napi_error)?)
}

#[napi]
pub fn compare_loans(input_json: String) -> NapiResult<String> {
    let input: comparison::ComparisonInput = parse(&input_json)?;
    render(&comparison::compare_loans(&input).map_err(to_napi_error)?)
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

#[napi]
pub fn compound_growth(input_json: String) -> NapiResult<String> {
    let input: growth::GrowthInput = parse(&input_json)?;
    render(&growth::compute_growth(&input).map_err(to_napi_error)?)
}

// ---------------------------------------------------------------------------
// Readiness
// ---------------------------------------------------------------------------

/// Score a typed profile.
#[napi]
pub fn readiness_score(input_json: String) -> NapiResult<String> {
    let input: profile::FinancialProfile = parse(&input_json)?;
    render(&scorer::score_profile(&input))
}

/// Score raw wizard state; unparseable fields count as zero.
#[napi]
pub fn readiness_score_form(input_json: String) -> NapiResult<String> {
    let input: profile::ProfileForm = parse(&input_json)?;
    render(&scorer::score_form(&input))
}

// ---------------------------------------------------------------------------
// Credit building
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_score(input_json: String) -> NapiResult<String> {
    let input: what_if::WhatIfInput = parse(&input_json)?;
    render(&what_if::simulate(&input))
}

/// Progress for a list of completed task ids, e.g. `[1, 3]`.
#[napi]
pub fn roadmap_progress(completed_ids_json: String) -> NapiResult<String> {
    let ids: Vec<roadmap::TaskId> = parse(&completed_ids_json)?;
    let progress = roadmap::replay(&ids).map_err(to_napi_error)?.snapshot();
    render(&progress)
}

// ---------------------------------------------------------------------------
// Credit health
// ---------------------------------------------------------------------------

#[napi]
pub fn health_report(input_json: String) -> NapiResult<String> {
    let input: report::HealthReportInput = parse(&input_json)?;
    render(&report::build_health_report(&input))
}

#[napi]
pub fn score_trend(input_json: String) -> NapiResult<String> {
    let history: Vec<tracking::ScoreObservation> = parse(&input_json)?;
    render(&tracking::analyze_history(&history).map_err(to_napi_error)?)
}
